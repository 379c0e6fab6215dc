use crate::consts;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a rectangle of the given size centered within `area`, clipped to
/// `area` if it doesn't fit
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [r] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [r] = Layout::vertical([size.height]).flex(Flex::Center).areas(r);
    r
}

/// Render an error and its chain of sources as a list of messages, outermost
/// first
pub(crate) fn error_chain(e: &dyn std::error::Error) -> Vec<String> {
    let mut msgs = vec![e.to_string()];
    let mut source = e.source();
    while let Some(src) = source {
        msgs.push(src.to_string());
        source = src.source();
    }
    msgs
}

pub(crate) trait EnumExt: Enum + Sized {
    fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        let from_usize: fn(usize) -> Self = Self::from_usize;
        (0..Self::LENGTH).map(from_usize)
    }
}

impl<T: Enum> EnumExt for T {}
