use game_types::RewardTier;

/// Shown under every summary regardless of tier.
pub const REWARD_NOTICE: &str = "Note: rewards are for in-store play only and can be claimed on the spot. \
Limited to once per day. Take a screenshot in case this screen closes!";

pub struct RewardPolicy;

impl RewardPolicy {
    /// Pick the reward tier for a final score
    pub fn tier_for(score: u32, threshold: u32) -> RewardTier {
        if score >= threshold {
            RewardTier::PrizeWon
        } else {
            RewardTier::NeedMore {
                points: threshold - score,
            }
        }
    }

    /// Player-facing copy for a tier
    pub fn message_for(tier: &RewardTier, threshold: u32) -> String {
        match tier {
            RewardTier::PrizeWon => format!(
                "Congratulations! You reached {} points or more! \
                 Show this screen to a staff member to receive a 100 yen coupon!",
                threshold
            ),
            RewardTier::NeedMore { points } => format!(
                "So close! You need {} more points to win the coupon. Try again!",
                points
            ),
        }
    }
}
