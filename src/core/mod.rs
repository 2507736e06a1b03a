//! Business logic over the persistent store: accessors for every stored
//! collection and the views derived from them.

pub mod analytics;
pub mod backup;
pub mod bookkeeping;
pub mod cart;
pub mod catalog;
pub mod community;
pub mod hours;
pub mod mascot;
pub mod notifications;
pub mod offers;
pub mod orders;
pub mod profile;
pub mod proximity;
pub mod usage;
