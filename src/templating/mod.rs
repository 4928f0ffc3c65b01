//! Tera templating over flattened content.
//!
//! The helper's job ends with plain JSON; this module hands that JSON to Tera.
//! [`TemplateContextBuilder`] lays out `post`, `posts`, `menus` and custom
//! variables, and [`TemplateRenderer`] renders a template string against it.
//!
//! # Examples
//!
//! ```rust
//! use dustpress_helper::models::Post;
//! use dustpress_helper::templating::{TemplateContextBuilder, TemplateRenderer};
//!
//! let ctx = TemplateContextBuilder::new()
//!     .with_post(Post::new(1, "page").with_attribute("post_title", "About"))
//!     .build()
//!     .unwrap();
//!
//! let html = TemplateRenderer::new().render_str("<h1>{{ post.post_title }}</h1>", &ctx).unwrap();
//! assert_eq!(html, "<h1>About</h1>");
//! ```
//!
//! Menus render recursively with a macro:
//!
//! ```text
//! {% macro items(list) %}
//!   {% for item in list %}
//!     <li class="{{ item.classes | join(sep=' ') }}">
//!       <a href="{{ item.url }}">{{ item.title }}</a>
//!       {% if item.Submenu %}<ul>{{ self::items(list=item.Submenu) }}</ul>{% endif %}
//!     </li>
//!   {% endfor %}
//! {% endmacro %}
//! ```

mod context;
mod renderer;

pub use context::TemplateContextBuilder;
pub use renderer::{TemplateRenderer, format_tera_error};
