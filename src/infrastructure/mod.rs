pub mod json_file_repo;
#[cfg(test)]
pub mod memory_repo;
