mod request_id;
mod process_time;

pub use request_id::request_id_middleware;
pub use process_time::process_time_middleware;

#[cfg(test)]
pub use request_id::{INSTANCE_HEADER, REQUEST_ID_HEADER};
#[cfg(test)]
pub use process_time::PROCESS_TIME_HEADER;
