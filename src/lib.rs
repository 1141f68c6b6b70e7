//! Memeforge is a headless meme editor: pick an image, caption it top and bottom, flatten
//! the screen into one bitmap and hand it to a share target.
//!
//! # Pipeline overview
//!
//! 1. **Pick**: an [`ImageSource`] answers a [`PickRequest`] with a [`Bitmap`] or a cancel.
//! 2. **Edit**: caption input flows through [`MemeScreen`], which re-derives its [`Surface`]
//!    (image view, two caption layers, navigation bar, toolbar) after every event.
//! 3. **Flatten**: [`compose`] hides the chrome layers, captures the surface with a
//!    [`SurfaceRenderer`] and restores the chrome on every exit path.
//! 4. **Share**: a [`ShareGateway`] receives the flattened bitmap; a successful share yields
//!    exactly one [`MemeRecord`].
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **One source of truth**: widget properties ([`ScreenView`]) and layers are derived from
//!   screen state, never edited directly.
//! - **Premultiplied RGBA8** end-to-end: bitmaps and renderer output share one pixel format.
//! - **Modal flows are two-phase**: `begin_*` opens the single pending slot, `complete_*`
//!   resolves it; stale or overlapping completions are reported, not applied.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod adapters;
mod assets;
mod caption;
mod compose;
mod foundation;
mod render;
mod screen;
mod surface;

pub use adapters::keyboard::{KeyboardCenter, KeyboardEvent, KeyboardSubscription, shift_viewport};
pub use adapters::share::{FileShareGateway, ShareCompletion, ShareGateway, ensure_parent_dir};
pub use adapters::source::{FileImageSource, ImageSource, PickOutcome, SourceKind};
pub use assets::bitmap::{Bitmap, decode_image, load_image};
pub use assets::font::{FontDescriptor, FontResolver, ResolvedFont};
pub use assets::text::{RegisteredFace, TextAlign, TextLayoutEngine};
pub use caption::field::{CaptionField, CaptionFields, CaptionPosition, CaptionSlot, SubmitOutcome};
pub use caption::style::{CaptionStyle, GlyphPaint};
pub use compose::engine::{ChromeGuard, compose};
pub use foundation::core::{Canvas, Rect, Rgba8};
pub use foundation::error::{MemeError, MemeResult};
pub use render::backend::SurfaceRenderer;
pub use render::cpu::CpuRenderer;
pub use screen::config::{CaptionConfig, ChromeConfig, ScreenConfig, ScreenLayout};
pub use screen::record::{MemeRecord, MemeSummary};
pub use screen::state::{
    BOTTOM_CAPTION, IMAGE_VIEW, MemeScreen, NAVIGATION_BAR, Phase, PickRequest, PickResolution,
    RequestId, ScreenView, ShareRequest, ShareResolution, TOOLBAR, TOP_CAPTION,
};
pub use surface::layout::place_image;
pub use surface::model::{
    ChromeKind, ContentMode, Layer, LayerContent, LayerId, Presentation, Surface,
};
