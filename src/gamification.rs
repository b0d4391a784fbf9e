//! Gamification engine
//!
//! Pure derivations over stored XP and badge counters. Nothing here mutates
//! state; deciding when XP or badge progress changes belongs to whatever
//! rule engine sits on top of the services.

/// XP required per level
pub const XP_PER_LEVEL: u32 = 500;

/// Level for an XP total: `xp / 500 + 1`, so level 1 at zero XP
pub fn level(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

/// XP earned inside the current level (drives the XP bar)
pub fn xp_into_level(xp: u32) -> u32 {
    xp % XP_PER_LEVEL
}

/// XP still needed to reach the next level
pub fn xp_to_next_level(xp: u32) -> u32 {
    XP_PER_LEVEL - xp_into_level(xp)
}

/// Fraction of a progress badge completed, in `[0, 1]`
///
/// Binary badges (`goal == 0`) always report 0 so no bar is drawn for them.
pub fn progress_fraction(progress: f64, goal: f64) -> f64 {
    if goal > 0.0 {
        (progress / goal).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
