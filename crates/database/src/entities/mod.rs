//! Entity definitions for the expense-tracking domain.

pub mod category;
pub mod expense;
pub mod invoice;
pub mod member;
pub mod restaurant;
pub mod user;

pub use category::{Category, CreateCategoryRequest};
pub use expense::{CreateExpenseRequest, Expense, UpdateExpenseRequest};
pub use invoice::{CreateInvoiceRequest, Invoice, UpdateInvoiceRequest};
pub use member::{CreateMemberRequest, RestaurantUser};
pub use restaurant::{
    CreateRestaurantRequest, MemberSummary, Restaurant, RestaurantWithUsers,
    UpdateRestaurantRequest,
};
pub use user::{CreateUserRequest, RestaurantSummary, UpdateUserRequest, User, UserWithRestaurants};
