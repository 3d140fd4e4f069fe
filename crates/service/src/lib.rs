pub mod errors;
pub mod todo;

pub use errors::ServiceError;
pub use todo::memory::MemoryTodoRepository;
pub use todo::repository::{SeaOrmTodoRepository, TodoRepository};
pub use todo::service::{NewTodoItem, TodoService};
