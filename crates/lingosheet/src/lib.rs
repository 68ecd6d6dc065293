#![doc = include_str!("../README.md")]

pub mod assemble;
pub mod convert;
pub mod error;
pub mod flatten;
pub mod model;
pub mod reconcile;
pub mod report;
pub mod store;
pub mod tree;
pub mod unflatten;
pub mod workbook;

pub use convert::{
    InputLayout, ToJsonOptions, ToWorkbookOptions, json_to_workbooks, scan_input,
    workbooks_to_json,
};
pub use error::SheetError;
pub use flatten::{FlattenRole, flatten};
pub use model::{FlatRecord, MergeConfig, SheetGroup};
pub use reconcile::{Reconciler, Strategy};
pub use report::{ConversionReport, Issue, Severity};
pub use store::{LocaleStore, Seed};
pub use tree::TranslationTree;
pub use unflatten::{
    Applied, CompositeKey, apply_record, apply_records, group_by_logical_id, is_plain_name,
    unflatten,
};
pub use workbook::{Sheet, Workbook};
