mod helpers;

pub use helpers::{camel_case, cell_reference, index_to_col_name, lower_camel_case};
