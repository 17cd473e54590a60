#[path = "../helpers/mod.rs"]
mod helpers;

mod emitters;
mod spline;
mod versioning;
