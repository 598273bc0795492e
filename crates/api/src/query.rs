//! Shared query parameter types for API handlers.
//!
//! Numeric parameters are taken as strings so a malformed value reports the
//! parameter's own code (`INVALID_PARAM_PAGE`, ...) instead of a generic
//! extractor rejection.

use reviewniverse_core::codes::Code;
use reviewniverse_core::error::CoreError;
use reviewniverse_core::search::{validate_keyword, validate_video_type, Page, VideoOrder};
use reviewniverse_db::models::user::UserSearch;
use reviewniverse_db::models::video::VideoSearch;
use serde::Deserialize;

/// Pagination parameters (`?p=&ps=`).
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub p: Option<String>,
    pub ps: Option<String>,
}

impl PageParams {
    pub fn to_page(&self, min_size: i64) -> Result<Page, CoreError> {
        let page = parse_opt(self.p.as_deref(), Code::InvalidParamPage)?;
        let page_size = parse_opt(self.ps.as_deref(), Code::InvalidParamPageSize)?;
        Page::new(page, page_size, min_size)
    }
}

/// `GET /users` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct UserSearchParams {
    #[serde(flatten)]
    pub page: PageParams,
    pub uid: Option<String>,
    pub nm: Option<String>,
    pub em: Option<String>,
}

impl UserSearchParams {
    pub fn to_search(&self) -> Result<UserSearch, CoreError> {
        Ok(UserSearch {
            user_id: parse_opt(self.uid.as_deref(), Code::InvalidRequest)?,
            nickname: non_empty(self.nm.as_deref()),
            email: non_empty(self.em.as_deref()),
        })
    }
}

/// `GET /videos` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct VideoSearchParams {
    #[serde(flatten)]
    pub page: PageParams,
    pub q: Option<String>,
    pub t: Option<String>,
    pub vid: Option<String>,
    pub aid: Option<String>,
    pub sid: Option<String>,
    pub gid: Option<String>,
    pub pid: Option<String>,
    pub ob: Option<String>,
}

impl VideoSearchParams {
    /// Validate in the order clients see the codes: page, page size, type,
    /// keyword, order.
    pub fn to_search(&self, min_page_size: i64) -> Result<(VideoSearch, Page, VideoOrder), CoreError> {
        let page = self.page.to_page(min_page_size)?;

        let video_type = match non_empty(self.t.as_deref()) {
            Some(t) => {
                validate_video_type(&t)?;
                Some(t)
            }
            None => None,
        };

        let keyword = match self.q.as_deref().filter(|q| !q.is_empty()) {
            Some(q) => Some(validate_keyword(q)?),
            None => None,
        };

        let order = match non_empty(self.ob.as_deref()) {
            Some(ob) => ob.parse()?,
            None => VideoOrder::default(),
        };

        let search = VideoSearch {
            keyword,
            video_type,
            video_id: parse_opt(self.vid.as_deref(), Code::InvalidRequest)?,
            actor_id: parse_opt(self.aid.as_deref(), Code::InvalidRequest)?,
            staff_id: parse_opt(self.sid.as_deref(), Code::InvalidRequest)?,
            genre_id: parse_opt(self.gid.as_deref(), Code::InvalidRequest)?,
            platform_id: non_empty(self.pid.as_deref()),
        };
        Ok((search, page, order))
    }
}

/// `?nickname=` for the availability check.
#[derive(Debug, Deserialize)]
pub struct NicknameParams {
    #[serde(default)]
    pub nickname: String,
}

/// `?email=` for the availability check.
#[derive(Debug, Deserialize)]
pub struct EmailParams {
    #[serde(default)]
    pub email: String,
}

fn parse_opt<T: std::str::FromStr>(raw: Option<&str>, code: Code) -> Result<Option<T>, CoreError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| CoreError::Validation(code)),
        None => Ok(None),
    }
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
