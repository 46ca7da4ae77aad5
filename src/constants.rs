pub mod limits {

    pub const MOVIE_TITLE_MAX_CHARS: usize = 60;

    pub const MOVIE_YEAR_MAX_CHARS: usize = 4;

    pub const USER_NAME_MAX_CHARS: usize = 20;

    pub const USERNAME_MAX_CHARS: usize = 20;
}

pub mod session {

    pub const COOKIE_NAME: &str = "watchlist_session";

    /// Session key holding the logged-in user's id.
    pub const USER_ID_KEY: &str = "user_id";

    /// Session key holding pending flash messages.
    pub const FLASHES_KEY: &str = "_flashes";

    /// Minimum secret length accepted by the cookie signing key.
    pub const MIN_SECRET_KEY_BYTES: usize = 64;
}

pub mod messages {

    pub const ITEM_CREATED: &str = "Item created.";

    pub const ITEM_UPDATED: &str = "Item updated.";

    pub const ITEM_DELETED: &str = "Item deleted.";

    pub const INVALID_INPUT: &str = "Invalid input.";

    pub const LOGIN_SUCCESS: &str = "Login success.";

    pub const LOGIN_FAILED: &str = "Invalid username or password.";

    pub const LOGIN_REQUIRED: &str = "Please log in to access this page.";

    pub const LOGGED_OUT: &str = "Goodbye.";

    pub const SETTINGS_UPDATED: &str = "Settings updated.";
}
