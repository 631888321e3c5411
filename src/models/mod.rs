//! Data models for Biblion

pub mod author;
pub mod availability;
pub mod book;
pub mod category;
pub mod library;
pub mod offer;
pub mod relation;
pub mod session;
pub mod user;

// Re-export commonly used types
pub use author::Author;
pub use availability::Availability;
pub use book::{Book, BookDetail, BookSummary};
pub use category::Category;
pub use library::Library;
pub use offer::{DonationOffer, OfferDetails};
pub use relation::UserBookRelation;
pub use session::{BorrowSession, SessionDetails};
pub use user::{User, UserShort};
