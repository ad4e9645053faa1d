//! Repository implementations, one per entity.

pub mod category_repository;
pub mod expense_repository;
pub mod invoice_repository;
pub mod member_repository;
pub mod restaurant_repository;
pub mod user_repository;

pub use category_repository::CategoryRepository;
pub use expense_repository::ExpenseRepository;
pub use invoice_repository::InvoiceRepository;
pub use member_repository::MemberRepository;
pub use restaurant_repository::RestaurantRepository;
pub use user_repository::UserRepository;
