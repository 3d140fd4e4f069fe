pub mod db;
pub mod todo_item;
