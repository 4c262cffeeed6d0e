pub mod temp_db;
