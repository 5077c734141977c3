use std::panic;

use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
};

/// Rough glyph advance relative to font size, used when fonts are unavailable.
const FALLBACK_ADVANCE: f64 = 0.6;

/// Forwards every call to the wrapped backend, except that a failing or
/// panicking font lookup drops the text instead of aborting the chart.
///
/// Font loading goes through the host's font configuration, which may be
/// absent on headless machines; the geometry of the chart is still drawn.
pub struct TextTolerantBackend<DB> {
    inner: DB,
    text_failed: bool,
}

impl<DB> TextTolerantBackend<DB> {
    pub fn new(inner: DB) -> Self {
        Self {
            inner,
            text_failed: false,
        }
    }
}

impl<DB: DrawingBackend> TextTolerantBackend<DB> {
    fn note_text_failure(&mut self, text: &str) {
        if !self.text_failed {
            log::warn!("font rendering unavailable, skipping chart text (first: {text:?})");
            self.text_failed = true;
        }
    }
}

impl<DB: DrawingBackend> DrawingBackend for TextTolerantBackend<DB> {
    type ErrorType = DB::ErrorType;

    fn get_size(&self) -> (u32, u32) {
        self.inner.get_size()
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.ensure_prepared()
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.present()
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_pixel(point, color)
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_line(from, to, style)
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_rect(upper_left, bottom_right, style, fill)
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_path(path, style)
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_circle(center, radius, style, fill)
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.fill_polygon(vert, style)
    }

    fn blit_bitmap(
        &mut self,
        pos: BackendCoord,
        (iw, ih): (u32, u32),
        src: &[u8],
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.blit_bitmap(pos, (iw, ih), src)
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        let inner = &mut self.inner;
        match panic::catch_unwind(panic::AssertUnwindSafe(|| inner.draw_text(text, style, pos))) {
            Ok(Err(DrawingErrorKind::FontError(_))) | Err(_) => {
                self.note_text_failure(text);
                Ok(())
            }
            Ok(result) => result,
        }
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Self::ErrorType>> {
        let inner = &self.inner;
        match panic::catch_unwind(panic::AssertUnwindSafe(|| {
            inner.estimate_text_size(text, style)
        })) {
            Ok(Err(DrawingErrorKind::FontError(_))) | Err(_) => {
                let size = style.size().max(1.0);
                let width = text.chars().count() as f64 * size * FALLBACK_ADVANCE;
                Ok((width.ceil() as u32, size.ceil() as u32))
            }
            Ok(result) => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotters::prelude::*;

    #[test]
    fn forwards_geometry_to_inner_backend() {
        let mut buf = vec![0u8; 20 * 10 * 3];
        {
            let backend = TextTolerantBackend::new(BitMapBackend::with_buffer(&mut buf, (20, 10)));
            assert_eq!(backend.get_size(), (20, 10));
            let root = backend.into_drawing_area();
            root.fill(&RGBColor(10, 20, 30)).unwrap();
            root.present().unwrap();
        }
        assert_eq!(&buf[..3], &[10, 20, 30]);
    }
}
