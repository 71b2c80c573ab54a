//! Text rendering of view models.

use colored::Colorize;
use likeboard_application::LedgerView;
use likeboard_core::like::{ButtonState, LikeRecord, RankingEntry};
use likeboard_core::marketer::{
    DirectoryFilter, DirectoryRender, MarketerCard, RankBadge, UserStats,
};
use likeboard_core::user::UserProfile;

fn badge(badge: RankBadge, rank: u32) -> String {
    match badge {
        RankBadge::Gold => "🥇".to_string(),
        RankBadge::Silver => "🥈".to_string(),
        RankBadge::Bronze => "🥉".to_string(),
        RankBadge::Plain => format!("#{}", rank),
    }
}

fn button(state: ButtonState) -> String {
    match state {
        ButtonState::Actionable => format!("[{}]", state.label()).green().to_string(),
        ButtonState::AlreadyLiked => format!("[♥ {}]", state.label()).magenta().to_string(),
        ButtonState::OwnProfile | ButtonState::QuotaExhausted => {
            format!("[{}]", state.label()).dimmed().to_string()
        }
    }
}

pub fn stats_line(stats: &UserStats) -> String {
    format!(
        "Likes given: {}  Likes received: {}  Remaining: {}",
        stats.likes_given, stats.likes_received, stats.remaining_likes
    )
}

pub fn card_line(card: &MarketerCard) -> String {
    let rank = match (card.rank_badge, card.rank) {
        (Some(b), Some(r)) => format!("{} ", badge(b, r)),
        _ => String::new(),
    };
    let name = if card.is_own_profile {
        format!("{} (you)", card.full_name)
    } else {
        card.full_name.clone()
    };

    format!(
        "{:>5}  {}{}  {}  ♥ {}  {}",
        card.id.to_string().dimmed(),
        rank,
        name.bold(),
        card.email,
        card.likes_count,
        button(card.button)
    )
}

pub fn directory(
    render: &DirectoryRender,
    filter: DirectoryFilter,
    stats: &UserStats,
    total: usize,
) -> String {
    let mut out = format!("{} ({} members, filter: {})\n", "Marketers".bold(), total, filter);
    out.push_str(&stats_line(stats));
    out.push('\n');

    match render {
        DirectoryRender::Empty => {
            out.push_str(&"No marketers found".dimmed().to_string());
            out.push('\n');
        }
        DirectoryRender::Cards(cards) => {
            for card in cards {
                out.push_str(&card_line(card));
                out.push('\n');
            }
        }
    }
    out
}

pub fn card_detail(card: &MarketerCard) -> String {
    let mut out = card_line(card);
    out.push('\n');
    out.push_str(&format!("       {}\n", card.bio));
    if let Some(avatar) = card.avatar.as_deref().filter(|a| !a.starts_with("data:")) {
        out.push_str(&format!("       Avatar: {}\n", avatar));
    }
    out
}

pub fn profile(user: &UserProfile) -> String {
    let mut out = format!("{} <{}> (id {})\n", user.full_name().bold(), user.email, user.id);
    if let Some(bio) = user.bio.as_deref().filter(|b| !b.is_empty()) {
        out.push_str(&format!("{}\n", bio));
    }
    let stats = [
        ("Likes given", user.likes_given),
        ("Likes received", user.likes_received),
        ("Remaining", user.remaining_likes),
        ("Rank", user.rank),
    ];
    for (label, value) in stats {
        if let Some(value) = value {
            out.push_str(&format!("{}: {}\n", label, value));
        }
    }
    out
}

pub fn given_likes(records: &[LikeRecord], view: &LedgerView) -> String {
    let mut out = format!(
        "Likes given: {}  Remaining: {}\n",
        view.likes_given, view.remaining
    );
    for record in records {
        let target = record
            .target_name
            .clone()
            .unwrap_or_else(|| format!("marketer {}", record.marketer_id));
        out.push_str(&format!(
            "  ♥ {}  {}\n",
            target,
            record.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
        ));
    }
    out
}

pub fn ranking(entries: &[RankingEntry]) -> String {
    if entries.is_empty() {
        return format!("{}\n", "No ranking available".dimmed());
    }

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let rank = entry.rank.unwrap_or(i as u32 + 1);
            let label = match RankBadge::for_rank(Some(rank)) {
                Some(b) => badge(b, rank),
                None => format!("#{}", rank),
            };
            format!(
                "{:>4}  {}  {}  ♥ {}\n",
                label,
                entry.full_name.bold(),
                entry.email,
                entry.likes_count
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use likeboard_core::like::LikeId;
    use likeboard_core::marketer::{Marketer, render_cards};
    use likeboard_core::user::UserId;

    fn plain() {
        colored::control::set_override(false);
    }

    fn marketer(id: i64, rank: Option<u32>) -> Marketer {
        Marketer {
            id: UserId(id),
            first_name: "Ana".to_string(),
            last_name: "Gomez".to_string(),
            email: "ana@example.com".to_string(),
            bio: None,
            avatar: None,
            likes_count: Some(3),
            rank,
            has_liked: false,
        }
    }

    #[test]
    fn test_card_line() {
        plain();
        let stats = UserStats::default();
        let card = MarketerCard::from_marketer(&marketer(2, Some(1)), Some(UserId(1)), &stats);
        let line = card_line(&card);
        assert!(line.contains("🥇 Ana Gomez"));
        assert!(line.contains("♥ 3"));
        assert!(line.ends_with("[Like]"));

        let own = MarketerCard::from_marketer(&marketer(1, Some(5)), Some(UserId(1)), &stats);
        let line = card_line(&own);
        assert!(line.contains("#5 Ana Gomez (you)"));
        assert!(line.ends_with("[Your profile]"));
    }

    #[test]
    fn test_empty_directory() {
        plain();
        let render = render_cards(&[], DirectoryFilter::Liked, None, None, &UserStats::default());
        let text = directory(&render, DirectoryFilter::Liked, &UserStats::default(), 0);
        assert!(text.contains("filter: liked"));
        assert!(text.contains("Remaining: 5"));
        assert!(text.contains("No marketers found"));
    }

    #[test]
    fn test_given_likes_falls_back_to_id() {
        plain();
        let records = vec![LikeRecord::new(LikeId(1), UserId(7))];
        let view = LedgerView {
            likes_given: 1,
            remaining: 4,
            buttons: Vec::new(),
        };
        let text = given_likes(&records, &view);
        assert!(text.starts_with("Likes given: 1  Remaining: 4"));
        assert!(text.contains("♥ marketer 7"));
    }

    #[test]
    fn test_ranking_uses_position_without_rank() {
        plain();
        let entries = vec![RankingEntry {
            user_id: UserId(3),
            full_name: "Bruno Diaz".to_string(),
            email: "b@example.com".to_string(),
            avatar: None,
            likes_count: 9,
            rank: None,
        }];
        assert!(ranking(&entries).contains("🥇  Bruno Diaz"));
        assert!(ranking(&[]).contains("No ranking available"));
    }
}
