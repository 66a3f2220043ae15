//! Camera fly-to animation.
//!
//! The viewer camera moves only through eased tweens: an initial fly-in
//! once the model settles, and click-to-focus flights started by the
//! pointer interaction tool.

pub mod fly_to;
