pub mod property;
pub mod types;

pub use property::{
    PropertyCondition, PropertyFilter, PropertyListQuery, PropertySortField, SearchField,
};
pub use types::{PageMeta, Pagination, SortDirection};
