pub mod batch;
pub mod decode;
pub mod destination;
pub mod exec;
pub mod row;
pub mod rows;
