pub(crate) mod blob_id;
pub(crate) mod date_time;
