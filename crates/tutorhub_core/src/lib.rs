pub mod catalog;
pub mod domain;
pub mod ports;

pub use catalog::{distinct_languages, PriceOrder, TutorialStats};
pub use domain::{
    integral_value, Collection, DeleteOutcome, Document, Filter, FindOptions, InsertOutcome, Sort,
    SortDirection, UpdateOutcome, ID_FIELD,
};
pub use ports::{DocumentStore, PortError, PortResult};
