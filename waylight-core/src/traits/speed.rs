//! Speed-compliance collaborator

use waylight_mailbox::ColorClass;

/// External judgment of current speed against the posted limit
pub trait SpeedCompliance {
    /// The color class for the current speed
    ///
    /// `Bad` = over the limit, `Decent` = close to it, `Good` = within it.
    fn color_class(&self) -> ColorClass;
}
