/// Alt text sentinel used when an image carries no alt attribute
///
/// CSS background images never have alt text, so they always carry this.
pub const ALT_TEXT_UNAVAILABLE: &str = "N/A";

/// Where on the page an image reference was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSource {
    /// `<img>` element (src or lazy-load attribute)
    ImgTag,
    /// `background-image` declaration inside a `<style>` block
    StyleBlock,
    /// `background-image` declaration inside an inline style attribute
    InlineStyle,
}

impl ImageSource {
    /// Stable string form used in the provenance manifest
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::ImgTag => "img_tag",
            Self::StyleBlock => "style_tag",
            Self::InlineStyle => "inline_style",
        }
    }

    /// Parses the manifest string form back into an ImageSource
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "img_tag" => Some(Self::ImgTag),
            "style_tag" => Some(Self::StyleBlock),
            "inline_style" => Some(Self::InlineStyle),
            _ => None,
        }
    }
}

/// A harvested image reference with its page provenance
///
/// Created during extraction, read-only afterward, consumed by the batch
/// downloader. The URL is absolute and unique within one domain crawl.
#[derive(Debug, Clone)]
pub struct ImageReference {
    /// Absolute image URL
    pub url: String,

    /// Alt text, or [`ALT_TEXT_UNAVAILABLE`] when absent
    pub alt_text: String,

    /// Which page construct the reference came from
    pub source: ImageSource,

    /// URL of the page the image was found on
    pub source_page: String,

    /// Flattened text of the source page, attached as context
    pub page_context: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_string_round_trip() {
        for source in [
            ImageSource::ImgTag,
            ImageSource::StyleBlock,
            ImageSource::InlineStyle,
        ] {
            assert_eq!(
                ImageSource::from_db_string(source.to_db_string()),
                Some(source)
            );
        }
    }

    #[test]
    fn test_unknown_db_string() {
        assert_eq!(ImageSource::from_db_string("carrier_pigeon"), None);
    }
}
