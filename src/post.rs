//! Posts and their extraction from collection index markup.
//!
//! An index page lists one `.index-item` container per post, each holding a
//! link with declarative-navigation attributes:
//!
//! ```html
//! <div class="index-item">
//!     <h3 class="index-title">
//!         <a hx-get="/posts/20240101_title/post.html"
//!            hx-target="#content-area"
//!            hx-push-url="#post/20240101_title">Title</a>
//!     </h3>
//! </div>
//! ```
//!
//! Missing containers or links are not errors: they yield fewer (or no)
//! posts, and previous/next links simply do not appear.

use crate::{
    log,
    markup::{attr_value, create_reader, has_class, is_void, resolve_entity},
    route::POST_PREFIX,
};
use quick_xml::events::Event;
use std::hash::{Hash, Hasher};

/// Class marking one post's container inside an index page.
pub const INDEX_ITEM_CLASS: &str = "index-item";

/// Substring that identifies index markup (the container around all items).
pub const INDEX_CONTAINER_CLASS: &str = "index-container";

/// One post as listed in a collection index.
///
/// Equality and hashing use `path` only.
#[derive(Debug, Clone, Eq)]
pub struct Post {
    /// Stable identifier, e.g. `20240101_title`
    pub path: String,
    /// Display title
    pub title: String,
    /// Fragment resource location
    pub url: String,
}

impl Post {
    pub fn new(path: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            url: url.into(),
        }
    }

    /// Canonical location hash of this post.
    pub fn hash(&self) -> String {
        format!("{POST_PREFIX}{}", self.path)
    }
}

impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Hash for Post {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

/// Whether a fragment is a collection index.
#[inline]
pub fn is_index_markup(html: &str) -> bool {
    html.contains(INDEX_CONTAINER_CLASS)
}

/// Link captured inside the current index item.
struct LinkCapture {
    push_url: String,
    url: String,
    title: String,
    /// Element depth at which the link was opened
    depth: usize,
    closed: bool,
}

/// Extract the ordered post list from index markup.
///
/// Only the first `a[hx-push-url]` of each `.index-item` counts. Parse
/// errors stop extraction and keep what was collected so far.
pub fn extract_posts(html: &str) -> Vec<Post> {
    let mut reader = create_reader(html);
    let mut posts = Vec::new();

    let mut depth = 0usize;
    let mut item_depth: Option<usize> = None;
    let mut link: Option<LinkCapture> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(elem)) => {
                let name = elem.name();
                if is_void(name.as_ref()) {
                    continue;
                }
                depth += 1;

                if item_depth.is_none() && has_class(&elem, INDEX_ITEM_CLASS) {
                    item_depth = Some(depth);
                    link = None;
                } else if item_depth.is_some()
                    && link.is_none()
                    && name.as_ref().eq_ignore_ascii_case(b"a")
                    && let Some(push_url) = attr_value(&elem, b"hx-push-url")
                {
                    let url = attr_value(&elem, b"hx-get")
                        .or_else(|| attr_value(&elem, b"href"))
                        .unwrap_or_default();
                    link = Some(LinkCapture {
                        push_url,
                        url,
                        title: String::new(),
                        depth,
                        closed: false,
                    });
                }
            }
            Ok(Event::Text(text)) => {
                if let Some(capture) = link.as_mut().filter(|c| !c.closed) {
                    capture.title.push_str(&String::from_utf8_lossy(&text));
                }
            }
            Ok(Event::GeneralRef(entity)) => {
                if let Some(capture) = link.as_mut().filter(|c| !c.closed)
                    && let Some(text) = resolve_entity(&String::from_utf8_lossy(&entity))
                {
                    capture.title.push_str(&text);
                }
            }
            Ok(Event::End(_)) => {
                if let Some(capture) = link.as_mut()
                    && capture.depth == depth
                {
                    capture.closed = true;
                }
                if item_depth == Some(depth) {
                    if let Some(capture) = link.take() {
                        posts.push(capture.into_post());
                    }
                    item_depth = None;
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                log!(@debug "context"; "index markup parse error at {}: {err}", reader.error_position());
                break;
            }
        }
    }

    // An unterminated final item still counts
    if item_depth.is_some()
        && let Some(capture) = link.take()
    {
        posts.push(capture.into_post());
    }

    posts
}

impl LinkCapture {
    fn into_post(self) -> Post {
        let path = self
            .push_url
            .strip_prefix(POST_PREFIX)
            .unwrap_or(&self.push_url)
            .to_owned();
        let title = self.title.split_whitespace().collect::<Vec<_>>().join(" ");
        Post {
            path,
            title,
            url: self.url,
        }
    }
}
