//! Share targets for an exported image.

pub const SHARE_FILE_NAME: &str = "picturamind-image.png";
pub const DOWNLOAD_FILE_NAME: &str = "generated_image.png";
pub const SHARE_TITLE: &str = "AI Generated Image";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    WhatsApp,
    Email,
    SaveImage,
    Twitter,
    Facebook,
}

impl ShareTarget {
    pub const ALL: [ShareTarget; 5] = [
        ShareTarget::WhatsApp,
        ShareTarget::Email,
        ShareTarget::SaveImage,
        ShareTarget::Twitter,
        ShareTarget::Facebook,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ShareTarget::WhatsApp => "WhatsApp",
            ShareTarget::Email => "Email",
            ShareTarget::SaveImage => "Save Image",
            ShareTarget::Twitter => "Twitter",
            ShareTarget::Facebook => "Facebook",
        }
    }

    /// Text attached to a native share sheet.
    pub fn share_text(&self) -> Option<&'static str> {
        match self {
            ShareTarget::WhatsApp | ShareTarget::Facebook => {
                Some("Check out this AI-generated image from PicturaMind!")
            }
            ShareTarget::Twitter => Some(
                "Check out this AI-generated image from PicturaMind! #AI #ArtificialIntelligence",
            ),
            ShareTarget::Email | ShareTarget::SaveImage => None,
        }
    }

    /// Page to open when the platform has no native share sheet.
    pub fn fallback_url(&self) -> Option<&'static str> {
        match self {
            ShareTarget::WhatsApp => Some("https://web.whatsapp.com/send"),
            ShareTarget::Twitter => Some("https://twitter.com/compose/tweet"),
            ShareTarget::Facebook => Some("https://www.facebook.com/sharer.php"),
            ShareTarget::Email => Some(
                "mailto:?subject=Check out this AI-generated image!&body=Generated with PicturaMind",
            ),
            ShareTarget::SaveImage => None,
        }
    }

    /// Whether the target wants the image attached as a file.
    pub fn attaches_file(&self) -> bool {
        !matches!(self, ShareTarget::Email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_target_has_a_way_out() {
        for target in ShareTarget::ALL {
            assert!(
                target.fallback_url().is_some() || target == ShareTarget::SaveImage,
                "{} has no fallback",
                target.label()
            );
        }
    }
}
