//! Server-rendered pages.
//!
//! Every dynamic value goes through `html_escape` before it lands in markup.

use std::fmt::Write;

use axum::{http::StatusCode, response::Html};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use tower_sessions::Session;

use super::auth::CurrentUser;
use super::flash::{self, Flash};
use super::{ApiError, AppState};
use crate::constants::limits::{MOVIE_TITLE_MAX_CHARS, MOVIE_YEAR_MAX_CHARS, USER_NAME_MAX_CHARS};
use crate::models::{Movie, User};

/// Per-request data every page shows: who is logged in, whose list this is,
/// and the flash messages consumed by this render.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub user: Option<User>,
    pub owner_name: Option<String>,
    pub flashes: Vec<Flash>,
}

impl PageContext {
    pub async fn load(
        state: &AppState,
        session: &Session,
        current: CurrentUser,
    ) -> Result<Self, ApiError> {
        let owner_name = match &current.0 {
            Some(user) => Some(user.name.clone()),
            None => state.auth().site_owner().await?.map(|owner| owner.name),
        };

        Ok(Self {
            user: current.0,
            owner_name,
            flashes: flash::take(session).await,
        })
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    fn heading(&self) -> String {
        self.owner_name
            .as_ref()
            .map_or_else(|| "Watchlist".to_string(), |name| format!("{name}'s Watchlist"))
    }
}

fn layout(ctx: &PageContext, title: &str, body: &str) -> Html<String> {
    let mut html = String::with_capacity(1024 + body.len());
    let heading = ctx.heading();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{} - {}</title>\n</head>\n<body>\n<header>\n<h2>{}</h2>\n<nav>\n<ul>\n\
         <li><a href=\"/\">Home</a></li>\n",
        text(title),
        text(&heading),
        text(&heading),
    );

    if ctx.is_authenticated() {
        html.push_str("<li><a href=\"/settings\">Settings</a></li>\n");
        html.push_str("<li><a href=\"/logout\">Logout</a></li>\n");
    } else {
        html.push_str("<li><a href=\"/login\">Login</a></li>\n");
    }
    html.push_str("</ul>\n</nav>\n</header>\n");

    for message in &ctx.flashes {
        let _ = writeln!(
            html,
            "<div class=\"alert alert-{}\">{}</div>",
            message.level.as_str(),
            text(&message.message)
        );
    }

    let _ = write!(
        html,
        "<main>\n{body}</main>\n<footer>\n<small>&copy; Watchlist</small>\n</footer>\n</body>\n</html>\n"
    );

    Html(html)
}

#[must_use]
pub fn index(ctx: &PageContext, movies: &[Movie]) -> Html<String> {
    let mut body = String::new();

    let _ = writeln!(body, "<p>{} Titles</p>", movies.len());

    if ctx.is_authenticated() {
        let _ = write!(
            body,
            "<form method=\"post\" action=\"/\">\n\
             Name <input type=\"text\" name=\"title\" autocomplete=\"off\" maxlength=\"{MOVIE_TITLE_MAX_CHARS}\" required>\n\
             Year <input type=\"text\" name=\"year\" autocomplete=\"off\" maxlength=\"{MOVIE_YEAR_MAX_CHARS}\" required>\n\
             <input class=\"btn\" type=\"submit\" name=\"submit\" value=\"Add\">\n</form>\n"
        );
    }

    body.push_str("<ul class=\"movie-list\">\n");
    for movie in movies {
        let _ = write!(
            body,
            "<li>{} - {}",
            text(&movie.title),
            text(&movie.year)
        );
        if ctx.is_authenticated() {
            let _ = write!(
                body,
                "\n<span class=\"float-right\">\n\
                 <a class=\"btn\" href=\"/movie/edit/{id}\">Edit</a>\n\
                 <form class=\"inline-form\" method=\"post\" action=\"/movie/delete/{id}\">\n\
                 <input class=\"btn\" type=\"submit\" name=\"delete\" value=\"Delete\">\n\
                 </form>\n</span>\n",
                id = movie.id
            );
        }
        body.push_str("</li>\n");
    }
    body.push_str("</ul>\n");

    layout(ctx, "Home", &body)
}

#[must_use]
pub fn login(ctx: &PageContext) -> Html<String> {
    let body = "<h3>Login</h3>\n\
                <form method=\"post\" action=\"/login\">\n\
                Username<br>\n<input type=\"text\" name=\"username\" required><br><br>\n\
                Password<br>\n<input type=\"password\" name=\"password\" required><br><br>\n\
                <input class=\"btn\" type=\"submit\" name=\"submit\" value=\"Submit\">\n\
                </form>\n";

    layout(ctx, "Login", body)
}

#[must_use]
pub fn edit_movie(ctx: &PageContext, movie: &Movie) -> Html<String> {
    let mut body = String::new();
    let _ = write!(
        body,
        "<h3>Edit item</h3>\n\
         <form method=\"post\" action=\"/movie/edit/{id}\">\n\
         Name <input type=\"text\" name=\"title\" autocomplete=\"off\" maxlength=\"{MOVIE_TITLE_MAX_CHARS}\" required value=\"{title}\">\n\
         Year <input type=\"text\" name=\"year\" autocomplete=\"off\" maxlength=\"{MOVIE_YEAR_MAX_CHARS}\" required value=\"{year}\">\n\
         <input class=\"btn\" type=\"submit\" name=\"submit\" value=\"Update\">\n\
         </form>\n",
        id = movie.id,
        title = attr(&movie.title),
        year = attr(&movie.year),
    );

    layout(ctx, "Edit", &body)
}

#[must_use]
pub fn settings(ctx: &PageContext, name: &str) -> Html<String> {
    let mut body = String::new();
    let _ = write!(
        body,
        "<h3>Settings</h3>\n\
         <form method=\"post\" action=\"/settings\">\n\
         Your Name <input type=\"text\" name=\"name\" autocomplete=\"off\" maxlength=\"{USER_NAME_MAX_CHARS}\" required value=\"{}\">\n\
         <input class=\"btn\" type=\"submit\" name=\"submit\" value=\"Save\">\n\
         </form>\n",
        attr(name),
    );

    layout(ctx, "Settings", &body)
}

#[must_use]
pub fn not_found(ctx: &PageContext) -> Html<String> {
    let body = "<h3>Page Not Found - 404</h3>\n\
                <p>The page you requested does not exist.</p>\n\
                <a class=\"btn\" href=\"/\">Go Back</a>\n";

    layout(ctx, "404", body)
}

/// Standalone page for errors raised before a page context is available.
#[must_use]
pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let reason = status.canonical_reason().unwrap_or("Error");
    let mut body = String::new();
    let _ = write!(
        body,
        "<h3>{} - {}</h3>\n<p>{}</p>\n<a class=\"btn\" href=\"/\">Go Back</a>\n",
        text(reason),
        status.as_u16(),
        text(message),
    );

    layout(&PageContext::default(), reason, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::flash::FlashLevel;

    fn movie(id: i32, title: &str, year: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            year: year.to_string(),
        }
    }

    fn logged_in() -> PageContext {
        PageContext {
            user: Some(User {
                id: 1,
                name: "Skey".to_string(),
                username: Some("skey".to_string()),
            }),
            owner_name: Some("Skey".to_string()),
            flashes: Vec::new(),
        }
    }

    #[test]
    fn test_index_hides_controls_for_anonymous() {
        let ctx = PageContext {
            owner_name: Some("Skey".to_string()),
            ..PageContext::default()
        };
        let Html(html) = index(&ctx, &[movie(1, "Leon", "1994")]);

        assert!(html.contains("<h2>Skey's Watchlist</h2>"));
        assert!(html.contains("Leon - 1994"));
        assert!(html.contains("href=\"/login\""));
        assert!(!html.contains("name=\"title\""));
        assert!(!html.contains("/movie/delete/1"));
    }

    #[test]
    fn test_index_shows_controls_when_logged_in() {
        let Html(html) = index(&logged_in(), &[movie(4, "WALL-E", "2008")]);

        assert!(html.contains("name=\"title\""));
        assert!(html.contains("href=\"/movie/edit/4\""));
        assert!(html.contains("action=\"/movie/delete/4\""));
        assert!(html.contains("href=\"/logout\""));
    }

    #[test]
    fn test_titles_are_escaped() {
        let Html(html) = index(&logged_in(), &[movie(1, "<script>x</script>", "1999")]);
        assert!(!html.contains("<script>x</script>"));
        assert!(html.contains("&lt;script&gt;"));

        let Html(form) = edit_movie(&logged_in(), &movie(1, "Say \"Hi\"", "2001"));
        assert!(form.contains("value=\"Say &quot;Hi&quot;\""));
    }

    #[test]
    fn test_flashes_are_rendered() {
        let mut ctx = logged_in();
        ctx.flashes.push(Flash {
            level: FlashLevel::Success,
            message: "Item created.".to_string(),
        });
        let Html(html) = index(&ctx, &[]);

        assert!(html.contains("<div class=\"alert alert-success\">Item created.</div>"));
        assert!(html.contains("0 Titles"));
    }

    #[test]
    fn test_error_page_shows_status() {
        let Html(html) = error_page(StatusCode::NOT_FOUND, "Movie 9 not found");
        assert!(html.contains("Not Found - 404"));
        assert!(html.contains("Movie 9 not found"));
    }
}
