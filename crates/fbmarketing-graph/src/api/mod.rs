//! Typed endpoint methods
//!
//! One method per [`catalog`](crate::catalog) entry, each a thin wrapper
//! that fills [`CallArgs`](crate::CallArgs) and calls
//! [`GraphClient::call`](crate::GraphClient::call). Methods taking a `token`
//! argument authenticate with that token (a page or app token) instead of
//! the client's user token.
//!
//! ## Components
//!
//! - `user` - current user, users and profile pictures
//! - `page` - pages, page tokens, feeds and page app subscriptions
//! - `application` - app webhook subscriptions
//! - `marketing` - lead forms, leads, custom audiences and ad accounts
//! - `instagram` - Instagram accounts, media and hashtags
//! - `content` - posts, comments and insights

mod application;
mod content;
mod instagram;
mod marketing;
mod page;
mod user;

pub use application::WebhookSubscription;
pub use marketing::LeadsQuery;
