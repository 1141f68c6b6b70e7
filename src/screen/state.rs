use std::sync::Arc;

use crate::{
    adapters::{
        keyboard::{KeyboardCenter, KeyboardEvent, KeyboardSubscription, shift_viewport},
        share::{ShareCompletion, ShareGateway},
        source::{ImageSource, PickOutcome, SourceKind},
    },
    assets::bitmap::Bitmap,
    caption::{
        field::{CaptionFields, CaptionPosition, SubmitOutcome},
        style::CaptionStyle,
    },
    compose::engine::compose,
    foundation::error::{MemeError, MemeResult},
    render::backend::SurfaceRenderer,
    screen::{config::ScreenConfig, record::MemeRecord},
    surface::model::{
        ChromeKind, ContentMode, Layer, LayerContent, LayerId, Presentation, Surface,
    },
};

/// Layer id of the navigation bar.
pub const NAVIGATION_BAR: LayerId = LayerId(1);
/// Layer id of the toolbar.
pub const TOOLBAR: LayerId = LayerId(2);
/// Layer id of the image view.
pub const IMAGE_VIEW: LayerId = LayerId(3);
/// Layer id of the top caption field.
pub const TOP_CAPTION: LayerId = LayerId(4);
/// Layer id of the bottom caption field.
pub const BOTTOM_CAPTION: LayerId = LayerId(5);

const Z_IMAGE: i32 = 0;
const Z_CAPTION: i32 = 10;
const Z_CHROME: i32 = 20;

/// Whole-screen state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No base image.
    Empty,
    /// Base image present, captions editable, export enabled.
    Editing,
    /// A share is in flight.
    Exporting,
}

/// Identifier of one modal request; completions must present the matching id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

/// Outstanding picker request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickRequest {
    /// Request id to pass to [`MemeScreen::complete_pick`].
    pub id: RequestId,
    /// Requested source.
    pub kind: SourceKind,
}

/// Outstanding share request carrying the flattened bitmap.
#[derive(Clone, Debug)]
pub struct ShareRequest {
    /// Request id to pass to [`MemeScreen::complete_share`].
    pub id: RequestId,
    /// Bitmap to hand to the share gateway.
    pub image: Bitmap,
}

/// How a pick completion was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickResolution {
    /// The picked image became the base image.
    Applied,
    /// The user cancelled; nothing changed.
    Cancelled,
    /// Another modal request was pending; nothing was presented.
    Busy,
    /// The completion did not match the pending request and was ignored.
    Stale,
}

/// How a share completion was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShareResolution {
    /// The share succeeded and produced this record.
    Shared(MemeRecord),
    /// The share failed or was cancelled; nothing changed.
    NotShared,
    /// Another modal request was pending; nothing was presented.
    Busy,
    /// The completion did not match the pending request and was ignored.
    Stale,
}

/// Widget properties derived from the screen state.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenView {
    /// Current phase.
    pub phase: Phase,
    /// Whether the share control is enabled. True iff a base image is present.
    pub share_enabled: bool,
    /// Whether the picker controls accept taps.
    pub pick_enabled: bool,
    /// Content mode of the image view.
    pub content_mode: ContentMode,
    /// Displayed top caption.
    pub top_text: String,
    /// Displayed bottom caption.
    pub bottom_text: String,
    /// Focused caption field.
    pub focused: Option<CaptionPosition>,
    /// Vertical viewport translation applied while the keyboard covers the bottom caption.
    pub viewport_offset_y: f64,
    /// Whether keyboard notifications are currently observed.
    pub keyboard_subscribed: bool,
}

struct PendingShare {
    id: RequestId,
    top_text: String,
    bottom_text: String,
    base_image: Bitmap,
    flattened_image: Bitmap,
}

/// The meme editor screen.
///
/// All state lives here. After every event [`MemeScreen::surface`] and
/// [`MemeScreen::view`] are re-derived from it.
pub struct MemeScreen {
    config: ScreenConfig,
    captions: CaptionFields,
    base_image: Option<Bitmap>,
    content_mode: ContentMode,
    pending_pick: Option<PickRequest>,
    pending_share: Option<PendingShare>,
    next_request: u64,
    viewport_offset_y: f64,
    keyboard: Option<KeyboardSubscription>,
    surface: Surface,
}

impl std::fmt::Debug for MemeScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemeScreen")
            .field("phase", &self.phase())
            .field("base_image", &self.base_image)
            .field("content_mode", &self.content_mode)
            .field("pending_pick", &self.pending_pick)
            .field("pending_share", &self.pending_share.as_ref().map(|p| p.id))
            .finish()
    }
}

impl MemeScreen {
    /// Validate `config` and set up an empty screen.
    pub fn new(config: ScreenConfig) -> MemeResult<Self> {
        config.validate()?;

        let style = Arc::new(config.style.clone());
        let captions = CaptionFields::new(
            &config.captions.top_placeholder,
            &config.captions.bottom_placeholder,
            Arc::clone(&style),
        );
        let surface = build_surface(&config, style)?;

        let mut screen = Self {
            config,
            captions,
            base_image: None,
            content_mode: ContentMode::ScaleToFill,
            pending_pick: None,
            pending_share: None,
            next_request: 0,
            viewport_offset_y: 0.0,
            keyboard: None,
            surface,
        };
        screen.render();
        Ok(screen)
    }

    /// Configuration the screen was built from.
    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        if self.pending_share.is_some() {
            Phase::Exporting
        } else if self.base_image.is_some() {
            Phase::Editing
        } else {
            Phase::Empty
        }
    }

    /// Current base image.
    pub fn base_image(&self) -> Option<&Bitmap> {
        self.base_image.as_ref()
    }

    /// Caption controller.
    pub fn captions(&self) -> &CaptionFields {
        &self.captions
    }

    /// Current view hierarchy.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Widget properties derived from state.
    pub fn view(&self) -> ScreenView {
        ScreenView {
            phase: self.phase(),
            share_enabled: self.base_image.is_some(),
            pick_enabled: self.pending_pick.is_none() && self.pending_share.is_none(),
            content_mode: self.content_mode,
            top_text: self.captions.text(CaptionPosition::Top).to_string(),
            bottom_text: self.captions.text(CaptionPosition::Bottom).to_string(),
            focused: self.captions.focused(),
            viewport_offset_y: self.viewport_offset_y,
            keyboard_subscribed: self.keyboard.is_some(),
        }
    }

    /// Start observing keyboard notifications. Calling it again keeps the existing
    /// subscription.
    pub fn on_appear(&mut self, center: &KeyboardCenter) {
        if self.keyboard.is_none() {
            self.keyboard = Some(center.subscribe());
            tracing::debug!("subscribed to keyboard notifications");
        }
    }

    /// Stop observing keyboard notifications.
    pub fn on_disappear(&mut self) {
        if self.keyboard.take().is_some() {
            tracing::debug!("unsubscribed from keyboard notifications");
        }
    }

    /// Apply every queued keyboard notification; returns how many were applied.
    pub fn pump_keyboard(&mut self) -> usize {
        let events = match &self.keyboard {
            Some(sub) => sub.drain(),
            None => return 0,
        };
        for &event in &events {
            self.handle_keyboard(event);
        }
        events.len()
    }

    fn handle_keyboard(&mut self, event: KeyboardEvent) {
        let bottom_focused = self.captions.focused() == Some(CaptionPosition::Bottom);
        self.viewport_offset_y = shift_viewport(self.viewport_offset_y, bottom_focused, event);
    }

    /// Focus a caption field, clearing its text.
    pub fn begin_edit(&mut self, position: CaptionPosition) {
        self.captions.on_edit_begin(position);
        self.render();
    }

    /// Replace a caption's text with user input.
    pub fn set_caption(&mut self, position: CaptionPosition, text: &str) {
        self.captions.on_text_changed(position, text);
        self.render();
    }

    /// Submit a caption field, ending its editing.
    pub fn submit_caption(&mut self, position: CaptionPosition) -> SubmitOutcome {
        let outcome = self.captions.on_submit(position);
        self.render();
        outcome
    }

    /// Open the pending-pick slot. Returns `None` while any modal request is pending.
    pub fn begin_pick(&mut self, kind: SourceKind) -> Option<PickRequest> {
        if self.pending_pick.is_some() || self.pending_share.is_some() {
            tracing::debug!(?kind, "pick ignored, a modal request is pending");
            return None;
        }
        let request = PickRequest {
            id: self.next_request_id(),
            kind,
        };
        self.pending_pick = Some(request);
        self.render();
        Some(request)
    }

    /// Resolve the pending pick.
    pub fn complete_pick(&mut self, id: RequestId, outcome: PickOutcome) -> PickResolution {
        if self.pending_pick.map(|p| p.id) != Some(id) {
            tracing::debug!(?id, "ignoring stale pick completion");
            return PickResolution::Stale;
        }
        self.pending_pick = None;

        let resolution = match outcome {
            PickOutcome::Picked(image) => {
                tracing::debug!(
                    width = image.width(),
                    height = image.height(),
                    "base image picked"
                );
                self.base_image = Some(image);
                self.content_mode = ContentMode::AspectFit;
                PickResolution::Applied
            }
            PickOutcome::Cancelled => PickResolution::Cancelled,
        };
        self.render();
        resolution
    }

    /// Run a full modal pick through `source`.
    ///
    /// An adapter error closes the pending slot without changing the screen.
    #[tracing::instrument(skip(self, source))]
    pub fn pick_with<S: ImageSource + ?Sized>(
        &mut self,
        source: &mut S,
        kind: SourceKind,
    ) -> MemeResult<PickResolution> {
        let Some(request) = self.begin_pick(kind) else {
            return Ok(PickResolution::Busy);
        };
        match source.request_image(kind) {
            Ok(outcome) => Ok(self.complete_pick(request.id, outcome)),
            Err(e) => {
                self.complete_pick(request.id, PickOutcome::Cancelled);
                Err(e)
            }
        }
    }

    /// Flatten the current screen and open the pending-share slot.
    ///
    /// Returns `None` while any modal request is pending. Fails with
    /// [`MemeError::Precondition`] when there is no base image, and with
    /// [`MemeError::Capture`] when the surface cannot be captured.
    #[tracing::instrument(skip_all)]
    pub fn begin_share<R: SurfaceRenderer + ?Sized>(
        &mut self,
        renderer: &mut R,
    ) -> MemeResult<Option<ShareRequest>> {
        let Some(base_image) = self.base_image.clone() else {
            return Err(MemeError::precondition("share requires a base image"));
        };
        if self.pending_pick.is_some() || self.pending_share.is_some() {
            tracing::debug!("share ignored, a modal request is pending");
            return Ok(None);
        }

        let chrome = self.surface.chrome_ids();
        let flattened = compose(&mut self.surface, &chrome, renderer).inspect_err(|e| {
            tracing::error!(error = %e, "capturing the meme surface failed");
        })?;

        let id = self.next_request_id();
        self.pending_share = Some(PendingShare {
            id,
            top_text: self.captions.text(CaptionPosition::Top).to_string(),
            bottom_text: self.captions.text(CaptionPosition::Bottom).to_string(),
            base_image,
            flattened_image: flattened.clone(),
        });
        self.render();
        Ok(Some(ShareRequest {
            id,
            image: flattened,
        }))
    }

    /// Resolve the pending share. A successful share yields exactly one [`MemeRecord`]
    /// built from the values captured when the share began.
    pub fn complete_share(&mut self, id: RequestId, completion: ShareCompletion) -> ShareResolution {
        if self.pending_share.as_ref().map(|p| p.id) != Some(id) {
            tracing::debug!(?id, "ignoring stale share completion");
            return ShareResolution::Stale;
        }
        let Some(pending) = self.pending_share.take() else {
            return ShareResolution::Stale;
        };

        let resolution = if completion.succeeded {
            let record = MemeRecord::new(
                pending.top_text,
                pending.bottom_text,
                pending.base_image,
                pending.flattened_image,
            );
            tracing::info!(
                top = record.top_text(),
                bottom = record.bottom_text(),
                width = record.flattened_image().width(),
                height = record.flattened_image().height(),
                "meme shared"
            );
            ShareResolution::Shared(record)
        } else {
            tracing::debug!("share not completed");
            ShareResolution::NotShared
        };
        self.render();
        resolution
    }

    /// Run a full modal share: flatten with `renderer`, hand the bitmap to `gateway`, and
    /// dismiss the gateway on success.
    ///
    /// A gateway error closes the pending slot without creating a record.
    #[tracing::instrument(skip_all)]
    pub fn share_with<R, G>(
        &mut self,
        renderer: &mut R,
        gateway: &mut G,
    ) -> MemeResult<ShareResolution>
    where
        R: SurfaceRenderer + ?Sized,
        G: ShareGateway + ?Sized,
    {
        let Some(request) = self.begin_share(renderer)? else {
            return Ok(ShareResolution::Busy);
        };
        let completion = match gateway.share(&request.image) {
            Ok(c) => c,
            Err(e) => {
                self.complete_share(request.id, ShareCompletion { succeeded: false });
                return Err(e);
            }
        };

        let resolution = self.complete_share(request.id, completion);
        if matches!(resolution, ShareResolution::Shared(_)) {
            gateway.dismiss();
        }
        Ok(resolution)
    }

    /// Return to [`Phase::Empty`]: clear the image, restore the caption placeholders, disable
    /// export and abandon any pending request. Later completions for abandoned requests
    /// are ignored.
    pub fn reset(&mut self) {
        self.base_image = None;
        self.content_mode = ContentMode::ScaleToFill;
        self.captions.reset();
        self.pending_pick = None;
        self.pending_share = None;
        self.viewport_offset_y = 0.0;
        self.render();
        tracing::debug!("screen reset");
    }

    fn next_request_id(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }

    fn render(&mut self) {
        let image = self.base_image.clone();
        let mode = self.content_mode;
        if let Some(layer) = self.surface.layer_mut(IMAGE_VIEW) {
            layer.content = LayerContent::Image { image, mode };
        }

        for (id, position) in [
            (TOP_CAPTION, CaptionPosition::Top),
            (BOTTOM_CAPTION, CaptionPosition::Bottom),
        ] {
            let field = self.captions.field(position);
            if let Some(layer) = self.surface.layer_mut(id) {
                layer.content = LayerContent::Caption {
                    text: field.text().to_string(),
                    style: Arc::clone(field.style()),
                    align: field.align(),
                };
                layer.z = if field.above_image() {
                    Z_CAPTION
                } else {
                    Z_IMAGE - 1
                };
            }
        }
    }
}

fn build_surface(config: &ScreenConfig, style: Arc<CaptionStyle>) -> MemeResult<Surface> {
    let layout = config.layout();
    let mut surface = Surface::new(config.surface, config.background)?;

    surface.push(Layer {
        id: IMAGE_VIEW,
        frame: layout.image,
        z: Z_IMAGE,
        presentation: Presentation::default(),
        content: LayerContent::Image {
            image: None,
            mode: ContentMode::ScaleToFill,
        },
    })?;

    for (id, frame) in [
        (TOP_CAPTION, layout.top_caption),
        (BOTTOM_CAPTION, layout.bottom_caption),
    ] {
        surface.push(Layer {
            id,
            frame,
            z: Z_CAPTION,
            presentation: Presentation::default(),
            content: LayerContent::Caption {
                text: String::new(),
                style: Arc::clone(&style),
                align: Default::default(),
            },
        })?;
    }

    for (id, kind, frame) in [
        (
            NAVIGATION_BAR,
            ChromeKind::NavigationBar,
            layout.navigation_bar,
        ),
        (TOOLBAR, ChromeKind::Toolbar, layout.toolbar),
    ] {
        surface.push(Layer {
            id,
            frame,
            z: Z_CHROME,
            presentation: Presentation::default(),
            content: LayerContent::Chrome {
                kind,
                color: config.chrome.color,
            },
        })?;
    }

    Ok(surface)
}

#[cfg(test)]
#[path = "../../tests/unit/screen/state.rs"]
mod tests;
