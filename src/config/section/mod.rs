//! Configuration section definitions.
//!
//! Each module corresponds to a section in `resizer.toml`:
//!
//! | Module   | TOML Section | Purpose                                   |
//! |----------|--------------|-------------------------------------------|
//! | `output` | `[output]`   | Destination prefix and width list         |
//! | `encode` | `[encode]`   | JPEG / WebP quality, PNG compression      |
//! | `vector` | `[vector]`   | SVG rasterization base width, WebP mode   |
//! | `route`  | `[route]`    | Section allow-list                        |

mod encode;
mod output;
mod route;
mod vector;

pub use encode::EncodeConfig;
pub use output::{DEFAULT_WIDTHS, OutputConfig};
pub use route::RouteConfig;
pub use vector::{VectorConfig, VectorWebp};
