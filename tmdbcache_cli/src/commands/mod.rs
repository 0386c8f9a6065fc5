pub mod movies;
pub mod prune;
pub mod regional;
pub mod status;
pub mod trending;
pub mod tv;
pub mod warm;
