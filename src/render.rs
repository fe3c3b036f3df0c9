//! Post navigation markup (previous/next controls below a post).
//!
//! ```html
//! <nav class="post-navigation single" aria-label="Post navigation">
//!   <button class="nav-button next" aria-label="Next post: Title"
//!           hx-get="/posts/x/post.html" hx-target="#content-area" hx-push-url="#post/x">
//!     <div class="nav-content">
//!       <div class="nav-label">Next</div>
//!       <div class="nav-title">Title</div>
//!     </div>
//!     <span class="nav-arrow">→</span>
//!   </button>
//! </nav>
//! ```
//!
//! The `single` class marks a nav holding exactly one control.

use crate::{
    markup::{XmlWriter, create_writer, into_string, write_text_element},
    post::Post,
};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use std::io;

/// Which neighbor of the current post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    const fn class(self) -> &'static str {
        match self {
            Self::Previous => "nav-button prev",
            Self::Next => "nav-button next",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Previous => "Previous",
            Self::Next => "Next",
        }
    }

    const fn arrow(self) -> &'static str {
        match self {
            Self::Previous => "←",
            Self::Next => "→",
        }
    }
}

/// Render the navigation for a post's neighbors.
///
/// Returns `None` when there is neither a previous nor a next post.
/// `target` is the content mount point id the controls load into.
pub fn render_post_navigation(
    previous: Option<&Post>,
    next: Option<&Post>,
    target: &str,
) -> io::Result<Option<String>> {
    if previous.is_none() && next.is_none() {
        return Ok(None);
    }

    let class = if previous.is_some() != next.is_some() {
        "post-navigation single"
    } else {
        "post-navigation"
    };

    let mut writer = create_writer();
    let mut nav = BytesStart::new("nav");
    nav.push_attribute(("class", class));
    nav.push_attribute(("aria-label", "Post navigation"));
    writer.write_event(Event::Start(nav))?;

    if let Some(post) = previous {
        write_nav_button(&mut writer, Direction::Previous, post, target)?;
    }
    if let Some(post) = next {
        write_nav_button(&mut writer, Direction::Next, post, target)?;
    }

    writer.write_event(Event::End(BytesEnd::new("nav")))?;
    Ok(Some(into_string(writer)))
}

fn write_nav_button(
    writer: &mut XmlWriter,
    direction: Direction,
    post: &Post,
    target: &str,
) -> io::Result<()> {
    let aria = format!("{} post: {}", direction.label(), post.title);
    let hx_target = format!("#{target}");
    let push_url = post.hash();

    let mut button = BytesStart::new("button");
    button.push_attribute(("class", direction.class()));
    button.push_attribute(("aria-label", aria.as_str()));
    button.push_attribute(("hx-get", post.url.as_str()));
    button.push_attribute(("hx-target", hx_target.as_str()));
    button.push_attribute(("hx-push-url", push_url.as_str()));
    writer.write_event(Event::Start(button))?;

    // Arrow sits on the outer edge: before the text for prev, after it for next
    if direction == Direction::Previous {
        write_text_element(writer, "span", "nav-arrow", direction.arrow())?;
    }

    let mut content = BytesStart::new("div");
    content.push_attribute(("class", "nav-content"));
    writer.write_event(Event::Start(content))?;
    write_text_element(writer, "div", "nav-label", direction.label())?;
    write_text_element(writer, "div", "nav-title", &post.title)?;
    writer.write_event(Event::End(BytesEnd::new("div")))?;

    if direction == Direction::Next {
        write_text_element(writer, "span", "nav-arrow", direction.arrow())?;
    }

    writer.write_event(Event::End(BytesEnd::new("button")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::extract_posts;

    fn post(path: &str, title: &str) -> Post {
        Post::new(path, title, format!("/posts/{path}/post.html"))
    }

    #[test]
    fn test_no_neighbors_renders_nothing() {
        assert_eq!(render_post_navigation(None, None, "content-area").unwrap(), None);
    }

    #[test]
    fn test_both_neighbors() {
        let a = post("a", "Alpha");
        let c = post("c", "Gamma");
        let html = render_post_navigation(Some(&a), Some(&c), "content-area")
            .unwrap()
            .unwrap();

        assert!(html.starts_with(r#"<nav class="post-navigation" aria-label="Post navigation">"#));
        assert!(html.contains(r#"class="nav-button prev""#));
        assert!(html.contains(r#"class="nav-button next""#));
        assert!(html.contains(r##"hx-push-url="#post/c""##));
        assert!(html.contains(r##"hx-target="#content-area""##));
        assert!(html.contains("Previous post: Alpha"));
        assert!(html.find("Alpha").unwrap() < html.find("Gamma").unwrap());
    }

    #[test]
    fn test_single_variant() {
        let a = post("a", "Alpha");
        let html = render_post_navigation(Some(&a), None, "content-area")
            .unwrap()
            .unwrap();
        assert!(html.contains(r#"class="post-navigation single""#));
        assert!(!html.contains("nav-button next"));

        let html = render_post_navigation(None, Some(&a), "content-area")
            .unwrap()
            .unwrap();
        assert!(html.contains(r#"class="post-navigation single""#));
        assert!(!html.contains("nav-button prev"));
    }

    #[test]
    fn test_titles_are_escaped() {
        let a = post("a", "Fish & <Chips>");
        let html = render_post_navigation(Some(&a), None, "content-area")
            .unwrap()
            .unwrap();
        assert!(html.contains("Fish &amp; &lt;Chips&gt;"));
    }

    #[test]
    fn test_markup_is_not_an_index() {
        // Rendered controls must not be mistaken for index items
        let a = post("a", "Alpha");
        let html = render_post_navigation(Some(&a), None, "content-area")
            .unwrap()
            .unwrap();
        assert!(extract_posts(&html).is_empty());
    }
}
