//! Domain models and request inputs.

pub mod catalog;
pub mod order;
pub mod product;
pub mod user;
pub mod voucher;

pub use catalog::{Brand, Category, CreateBrandInput, CreateCategoryInput};
pub use order::{
    CartLine, CheckoutReceipt, Order, OrderItem, OrderItemDetail, OrderWithDetails,
    PlaceOrderInput,
};
pub use product::{CreateProductInput, Product, ProductFilter, ProductSort, UpdateProductInput};
pub use user::{CreateUserInput, CurrentUser, UpdateUserInput, User, session_keys};
pub use voucher::{
    CreateVoucherInput, Voucher, VoucherRequest, VoucherRequestDetail, VoucherSummary,
};
