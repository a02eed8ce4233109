pub mod route_ops;
