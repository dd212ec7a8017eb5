//! Player/platform landing and overlap checks
//!
//! Platforms are one-way: the player passes up through them and only lands
//! while falling. The landing window extends one frame of fall (plus a
//! little slack) below the platform top so fast falls cannot tunnel.

use super::aabb::Aabb;
use super::entities::{Platform, PlatformKind, Player};
use crate::consts::*;

/// What happened when the player touched down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Rest,
    /// First landing on a breaking platform; its countdown is now running
    BreakArmed,
    Bounce,
}

/// Would a player with this box and vertical speed land on `platform`?
pub fn lands_on(player: &Aabb, vel_y: f32, platform: &Aabb) -> bool {
    if vel_y <= 0.0 {
        return false;
    }
    let bottom = player.bottom();
    let top = platform.top();
    bottom >= top && bottom <= top + vel_y + LANDING_TOLERANCE && player.overlaps_x(platform)
}

/// Resolve landing against the first platform in the hit window.
///
/// Snaps the player onto it, clears the jump state and banks a double jump.
/// Breaking platforms are armed; bounce platforms throw the player back up.
pub fn resolve_platform_landing(player: &mut Player, platforms: &mut [Platform]) -> Option<Landing> {
    if player.vel.y <= 0.0 {
        return None;
    }

    let bounds = player.bounds();
    let index = platforms
        .iter()
        .position(|p| lands_on(&bounds, player.vel.y, &p.bounds()))?;
    let platform = &mut platforms[index];

    player.pos.y = platform.pos.y - player.size.y;
    player.vel.y = 0.0;
    player.jumping = false;
    player.can_double_jump = true;

    let landing = match platform.kind {
        PlatformKind::Breaking { .. } => {
            if platform.trigger_break() {
                Landing::BreakArmed
            } else {
                Landing::Rest
            }
        }
        PlatformKind::Bounce => {
            player.vel.y = JUMP_IMPULSE * BOUNCE_MULTIPLIER;
            player.jumping = true;
            Landing::Bounce
        }
        _ => Landing::Rest,
    };
    Some(landing)
}
