//! Endpoint catalog
//!
//! Static descriptors for every Graph endpoint the client wraps. Each entry
//! is dispatched by [`GraphClient::call`](crate::client::GraphClient::call);
//! the typed methods in [`api`](crate::api) are thin wrappers over these.
//!
//! ## Groups
//!
//! - OAuth: `app_token`, `exchange_code`, `extend_token`, `inspect_token`
//! - User and pages: `account`, `pages`, `user`, `user_picture`, page feed
//!   and page app subscriptions
//! - App webhooks: `app_subscriptions` and friends
//! - Leads: `leadgen_forms`, `leadgen`, `ad_leads`
//! - Marketing: custom audiences and ad accounts
//! - Instagram: accounts, media, comments and hashtags
//! - Content: comments and insights

use crate::endpoint::{Auth, Endpoint, Verb};

const fn token_get(name: &'static str, summary: &'static str, path: &'static str) -> Endpoint {
    Endpoint {
        name,
        summary,
        verb: Verb::Get,
        path,
        auth: Auth::Token,
        fixed_params: &[],
        required_params: &[],
        uses_limit: false,
        https_params: &[],
        hashed_records: false,
    }
}

const fn oauth(name: &'static str, summary: &'static str) -> Endpoint {
    Endpoint {
        auth: Auth::App,
        ..token_get(name, summary, "/oauth/access_token")
    }
}

// ============================================================================
// OAuth
// ============================================================================

pub const APP_TOKEN: Endpoint = Endpoint {
    fixed_params: &[("grant_type", "client_credentials")],
    ..oauth("app_token", "Generate an app access token")
};

pub const EXCHANGE_CODE: Endpoint = Endpoint {
    required_params: &["redirect_uri", "code"],
    ..oauth("exchange_code", "Exchange an OAuth code for a user token")
};

pub const EXTEND_TOKEN: Endpoint = Endpoint {
    fixed_params: &[("grant_type", "fb_exchange_token")],
    required_params: &["fb_exchange_token"],
    ..oauth("extend_token", "Trade a short-lived token for a long-lived one")
};

pub const INSPECT_TOKEN: Endpoint = Endpoint {
    auth: Auth::None,
    required_params: &["input_token", "access_token"],
    ..token_get("inspect_token", "Inspect an access token", "/debug_token")
};

// ============================================================================
// User and pages
// ============================================================================

pub const ACCOUNT: Endpoint = token_get("account", "Current user", "/me");

pub const PAGES: Endpoint = Endpoint {
    uses_limit: true,
    ..token_get("pages", "Pages the user manages", "/me/accounts")
};

pub const USER: Endpoint = token_get("user", "A user by id", "/{user_id}");

pub const USER_PICTURE: Endpoint = Endpoint {
    fixed_params: &[("type", "large"), ("redirect", "false")],
    ..token_get("user_picture", "Profile picture of a user", "/{user_id}/picture")
};

pub const PAGE_SUBSCRIBED_APPS: Endpoint = token_get(
    "page_subscribed_apps",
    "Apps subscribed to a page",
    "/{page_id}/subscribed_apps",
);

pub const CREATE_PAGE_SUBSCRIBED_APPS: Endpoint = Endpoint {
    verb: Verb::Post,
    ..token_get(
        "create_page_subscribed_apps",
        "Subscribe the app to a page",
        "/{page_id}/subscribed_apps",
    )
};

pub const DELETE_PAGE_SUBSCRIBED_APPS: Endpoint = Endpoint {
    verb: Verb::Delete,
    ..token_get(
        "delete_page_subscribed_apps",
        "Unsubscribe the app from a page",
        "/{page_id}/subscribed_apps",
    )
};

pub const PAGE: Endpoint = token_get("page", "A page by id", "/{page_id}");

pub const PAGE_FEED: Endpoint = token_get("page_feed", "Posts of a page", "/{page_id}/feed");

// ============================================================================
// App webhooks
// ============================================================================

pub const APP_SUBSCRIPTIONS: Endpoint = token_get(
    "app_subscriptions",
    "Webhook subscriptions of the app",
    "/{app_id}/subscriptions",
);

pub const CREATE_APP_SUBSCRIPTIONS: Endpoint = Endpoint {
    verb: Verb::Post,
    required_params: &["object", "callback_url", "fields", "verify_token"],
    https_params: &["callback_url"],
    ..token_get(
        "create_app_subscriptions",
        "Create or update a webhook subscription",
        "/{app_id}/subscriptions",
    )
};

pub const DELETE_APP_SUBSCRIPTIONS: Endpoint = Endpoint {
    verb: Verb::Delete,
    ..token_get(
        "delete_app_subscriptions",
        "Delete webhook subscriptions",
        "/{app_id}/subscriptions",
    )
};

// ============================================================================
// Leads
// ============================================================================

pub const LEADGEN_FORMS: Endpoint = Endpoint {
    uses_limit: true,
    ..token_get(
        "leadgen_forms",
        "Lead forms of a page",
        "/{page_id}/leadgen_forms",
    )
};

pub const LEADGEN: Endpoint = token_get("leadgen", "A single lead", "/{leadgen_id}");

pub const AD_LEADS: Endpoint = token_get("ad_leads", "Leads of a form", "/{form_id}/leads");

// ============================================================================
// Marketing
// ============================================================================

pub const CUSTOM_AUDIENCES: Endpoint = token_get(
    "custom_audiences",
    "Custom audiences of an ad account",
    "/{account_id}/customaudiences",
);

pub const CREATE_CUSTOM_AUDIENCE: Endpoint = Endpoint {
    verb: Verb::Post,
    ..token_get(
        "create_custom_audience",
        "Create a custom audience",
        "/{account_id}/customaudiences",
    )
};

pub const ADD_AUDIENCE_USERS: Endpoint = Endpoint {
    verb: Verb::Post,
    hashed_records: true,
    ..token_get(
        "add_audience_users",
        "Add hashed users to an audience",
        "/{audience_id}/users",
    )
};

pub const REMOVE_AUDIENCE_USERS: Endpoint = Endpoint {
    verb: Verb::Delete,
    hashed_records: true,
    ..token_get(
        "remove_audience_users",
        "Remove hashed users from an audience",
        "/{audience_id}/users",
    )
};

pub const AD_ACCOUNTS: Endpoint =
    token_get("ad_accounts", "Ad accounts of the user", "/me/adaccounts");

// ============================================================================
// Instagram
// ============================================================================

pub const INSTAGRAM_ACCOUNT: Endpoint = token_get(
    "instagram_account",
    "Instagram business account of a page",
    "/{page_id}",
);

pub const INSTAGRAM_MEDIA: Endpoint = token_get(
    "instagram_media",
    "Media of an Instagram account",
    "/{page_id}/media",
);

pub const INSTAGRAM_MEDIA_OBJECT: Endpoint = token_get(
    "instagram_media_object",
    "A single Instagram media object",
    "/{media_id}",
);

pub const INSTAGRAM_MEDIA_COMMENTS: Endpoint = token_get(
    "instagram_media_comments",
    "Comments on Instagram media",
    "/{media_id}/comments",
);

pub const INSTAGRAM_HASHTAG_SEARCH: Endpoint = Endpoint {
    required_params: &["user_id", "q"],
    ..token_get(
        "instagram_hashtag_search",
        "Look up a hashtag id",
        "/ig_hashtag_search",
    )
};

pub const INSTAGRAM_HASHTAG: Endpoint = token_get(
    "instagram_hashtag",
    "A single hashtag",
    "/{hashtag_id}",
);

pub const INSTAGRAM_HASHTAG_RECENT_MEDIA: Endpoint = Endpoint {
    required_params: &["user_id"],
    ..token_get(
        "instagram_hashtag_recent_media",
        "Recent media tagged with a hashtag",
        "/{hashtag_id}/recent_media",
    )
};

pub const INSTAGRAM_HASHTAG_TOP_MEDIA: Endpoint = Endpoint {
    required_params: &["user_id"],
    ..token_get(
        "instagram_hashtag_top_media",
        "Top media tagged with a hashtag",
        "/{hashtag_id}/top_media",
    )
};

// ============================================================================
// Content
// ============================================================================

pub const POST: Endpoint = token_get("post", "A single post", "/{post_id}");

pub const COMMENT: Endpoint = token_get("comment", "A single comment", "/{comment_id}");

pub const POST_COMMENTS: Endpoint =
    token_get("post_comments", "Comments on a post", "/{post_id}/comments");

pub const INSIGHTS: Endpoint = token_get(
    "insights",
    "Insights of a page, post or media object",
    "/{object_id}/insights",
);

/// Every catalog entry, in listing order
pub const ALL: &[&Endpoint] = &[
    &APP_TOKEN,
    &EXCHANGE_CODE,
    &EXTEND_TOKEN,
    &INSPECT_TOKEN,
    &ACCOUNT,
    &PAGES,
    &USER,
    &USER_PICTURE,
    &PAGE_SUBSCRIBED_APPS,
    &CREATE_PAGE_SUBSCRIBED_APPS,
    &DELETE_PAGE_SUBSCRIBED_APPS,
    &PAGE,
    &PAGE_FEED,
    &APP_SUBSCRIPTIONS,
    &CREATE_APP_SUBSCRIPTIONS,
    &DELETE_APP_SUBSCRIPTIONS,
    &LEADGEN_FORMS,
    &LEADGEN,
    &AD_LEADS,
    &CUSTOM_AUDIENCES,
    &CREATE_CUSTOM_AUDIENCE,
    &ADD_AUDIENCE_USERS,
    &REMOVE_AUDIENCE_USERS,
    &AD_ACCOUNTS,
    &INSTAGRAM_ACCOUNT,
    &INSTAGRAM_MEDIA,
    &INSTAGRAM_MEDIA_OBJECT,
    &INSTAGRAM_MEDIA_COMMENTS,
    &INSTAGRAM_HASHTAG_SEARCH,
    &INSTAGRAM_HASHTAG,
    &INSTAGRAM_HASHTAG_RECENT_MEDIA,
    &INSTAGRAM_HASHTAG_TOP_MEDIA,
    &POST,
    &COMMENT,
    &POST_COMMENTS,
    &INSIGHTS,
];

/// Looks up a catalog entry by name
pub fn find(name: &str) -> Option<&'static Endpoint> {
    ALL.iter().copied().find(|endpoint| endpoint.name == name)
}
