pub mod catalog;
pub mod csv_io;
