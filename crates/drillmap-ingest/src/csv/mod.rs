//! CSV reading utilities.

mod reader;

pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, find_column, read_text_table,
    text_cells, validate_encoding,
};
