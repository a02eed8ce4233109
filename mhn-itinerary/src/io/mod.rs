pub mod read_ops;
