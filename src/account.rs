//! Signed-in user display and the account dropdown.
//!
//! The authentication backend is an `AuthProvider` supplied by the host. The
//! filter and detail logic never reads any of this; it only feeds the header.

use crate::markup::escape_html;
use crate::navigation::NavigationIntent;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use tracing::error;

const FALLBACK_NAME: &str = "User";
const FALLBACK_INITIAL: &str = "U";

/// Profile fields exposed by the auth backend. All optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Host-provided authentication backend.
pub trait AuthProvider {
    fn current_user(&self) -> Option<CurrentUser>;
    fn sign_out(&mut self) -> Result<()>;
}

/// Up to two upper-cased initials, one per whitespace-separated word.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// What the header shows in place of a profile photo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Avatar {
    Image(String),
    Initials(String),
}

impl CurrentUser {
    fn non_empty(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn display_name(&self) -> &str {
        Self::non_empty(&self.full_name).unwrap_or(FALLBACK_NAME)
    }

    /// Tooltip text: the full name, else the email.
    pub fn title(&self) -> &str {
        Self::non_empty(&self.full_name)
            .or_else(|| Self::non_empty(&self.email))
            .unwrap_or(FALLBACK_NAME)
    }

    /// Photo when present, else initials from the name, the first letter of
    /// the email, or `U`.
    pub fn avatar(&self) -> Avatar {
        if let Some(url) = Self::non_empty(&self.avatar_url) {
            return Avatar::Image(url.to_string());
        }
        let source = Self::non_empty(&self.full_name)
            .map(str::to_string)
            .or_else(|| {
                Self::non_empty(&self.email)
                    .and_then(|email| email.chars().next())
                    .map(String::from)
            })
            .unwrap_or_else(|| FALLBACK_INITIAL.to_string());
        Avatar::Initials(initials(&source))
    }
}

/// Account dropdown in the header.
#[derive(Clone, Debug, Default)]
pub struct AccountMenu {
    open: bool,
}

impl AccountMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn view_profile(&mut self) -> NavigationIntent {
        self.close();
        NavigationIntent::Profile
    }

    /// Sign out through `auth`. On success the dropdown closes and the caller
    /// should navigate home; on failure the error is logged, the dropdown is
    /// left as it was, and the error is returned.
    pub fn sign_out(&mut self, auth: &mut impl AuthProvider) -> Result<NavigationIntent> {
        if let Err(err) = auth.sign_out() {
            let detail = format!("{err:#}");
            error!(error = %detail, "sign-out failed");
            return Err(err);
        }
        self.close();
        Ok(NavigationIntent::Home)
    }

    /// Header account section: avatar button plus dropdown, or a sign-in
    /// link when nobody is signed in.
    pub fn write_html(&self, out: &mut impl Write, user: Option<&CurrentUser>) -> fmt::Result {
        let Some(user) = user else {
            return writeln!(
                out,
                "<a class=\"sign-in\" href=\"{}\">Sign In</a>",
                NavigationIntent::SignIn.path()
            );
        };

        writeln!(out, "<div class=\"account\">")?;
        writeln!(
            out,
            "<button type=\"button\" class=\"avatar-button\" title=\"{}\" aria-expanded=\"{}\">",
            escape_html(user.title()),
            self.open
        )?;
        write_avatar(out, &user.avatar())?;
        writeln!(out, "</button>")?;
        if self.open {
            writeln!(out, "<div class=\"account-menu\">")?;
            writeln!(
                out,
                "<div class=\"account-name\">{}</div>",
                escape_html(user.display_name())
            )?;
            if let Some(email) = &user.email {
                writeln!(out, "<div class=\"account-email\">{}</div>", escape_html(email))?;
            }
            writeln!(
                out,
                "<a href=\"{}\">View Profile</a>",
                NavigationIntent::Profile.path()
            )?;
            writeln!(out, "<button type=\"button\" class=\"sign-out\">Sign Out</button>")?;
            writeln!(out, "</div>")?;
        }
        writeln!(out, "</div>")
    }
}

fn write_avatar(out: &mut impl Write, avatar: &Avatar) -> fmt::Result {
    match avatar {
        Avatar::Image(url) => writeln!(
            out,
            "<img class=\"avatar\" src=\"{}\" alt=\"Profile\">",
            escape_html(url)
        ),
        Avatar::Initials(letters) => writeln!(
            out,
            "<span class=\"avatar initials\">{}</span>",
            escape_html(letters)
        ),
    }
}
