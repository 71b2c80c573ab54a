//! Pure directory projection: filter, search, sort, and card view models.

use super::model::{Marketer, UserStats};
use crate::like::ButtonState;
use crate::user::UserId;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

/// Highest rank shown by the `top` filter.
const TOP_RANK_LIMIT: u32 = 10;

const NO_BIO: &str = "No description available";

/// Active directory tab.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryFilter {
    #[default]
    All,
    Liked,
    Top,
}

/// Applies the filter then the search term.
///
/// - `Liked` keeps entries the session already liked, in server order.
/// - `Top` keeps ranks 1..=10 sorted ascending.
/// - `All` sorts by received likes, descending; a missing count is 0.
///
/// Sorts are stable, so ties keep server order.
pub fn filter_marketers(
    marketers: &[Marketer],
    filter: DirectoryFilter,
    search: Option<&str>,
) -> Vec<Marketer> {
    let mut filtered: Vec<Marketer> = match filter {
        DirectoryFilter::Liked => marketers.iter().filter(|m| m.has_liked).cloned().collect(),
        DirectoryFilter::Top => {
            let mut top: Vec<Marketer> = marketers
                .iter()
                .filter(|m| m.rank.is_some_and(|r| (1..=TOP_RANK_LIMIT).contains(&r)))
                .cloned()
                .collect();
            top.sort_by_key(|m| m.rank.unwrap_or(u32::MAX));
            top
        }
        DirectoryFilter::All => {
            let mut all = marketers.to_vec();
            all.sort_by(|a, b| b.likes().cmp(&a.likes()));
            all
        }
    };

    if let Some(term) = search.map(str::to_lowercase).filter(|t| !t.is_empty()) {
        filtered.retain(|m| m.matches(&term));
    }

    filtered
}

/// Medal shown next to a ranked marketer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RankBadge {
    Gold,
    Silver,
    Bronze,
    Plain,
}

impl RankBadge {
    pub fn for_rank(rank: Option<u32>) -> Option<Self> {
        match rank? {
            1 => Some(RankBadge::Gold),
            2 => Some(RankBadge::Silver),
            3 => Some(RankBadge::Bronze),
            r if (4..=TOP_RANK_LIMIT).contains(&r) => Some(RankBadge::Plain),
            _ => None,
        }
    }
}

/// Render-ready projection of a [`Marketer`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketerCard {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub bio: String,
    pub avatar: Option<String>,
    pub likes_count: u32,
    pub rank: Option<u32>,
    pub rank_badge: Option<RankBadge>,
    pub has_liked: bool,
    pub is_own_profile: bool,
    pub button: ButtonState,
}

impl MarketerCard {
    pub fn from_marketer(
        marketer: &Marketer,
        current_user: Option<UserId>,
        stats: &UserStats,
    ) -> Self {
        let is_own_profile = current_user == Some(marketer.id);
        Self {
            id: marketer.id,
            full_name: marketer.full_name(),
            email: marketer.email.clone(),
            bio: marketer
                .bio
                .clone()
                .filter(|b| !b.trim().is_empty())
                .unwrap_or_else(|| NO_BIO.to_string()),
            avatar: marketer.avatar.clone(),
            likes_count: marketer.likes(),
            rank: marketer.rank,
            rank_badge: RankBadge::for_rank(marketer.rank),
            has_liked: marketer.has_liked,
            is_own_profile,
            button: ButtonState::resolve(
                is_own_profile,
                marketer.has_liked,
                stats.remaining_likes as usize,
            ),
        }
    }
}

/// What the directory grid shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "cards", rename_all = "lowercase")]
pub enum DirectoryRender {
    Empty,
    Cards(Vec<MarketerCard>),
}

impl DirectoryRender {
    pub fn cards(&self) -> &[MarketerCard] {
        match self {
            DirectoryRender::Empty => &[],
            DirectoryRender::Cards(cards) => cards,
        }
    }
}

/// Pure render of the directory state into cards.
pub fn render_cards(
    marketers: &[Marketer],
    filter: DirectoryFilter,
    search: Option<&str>,
    current_user: Option<UserId>,
    stats: &UserStats,
) -> DirectoryRender {
    let cards: Vec<MarketerCard> = filter_marketers(marketers, filter, search)
        .iter()
        .map(|m| MarketerCard::from_marketer(m, current_user, stats))
        .collect();

    if cards.is_empty() {
        DirectoryRender::Empty
    } else {
        DirectoryRender::Cards(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marketer(id: i64, first: &str, likes: Option<u32>, rank: Option<u32>) -> Marketer {
        Marketer {
            id: UserId(id),
            first_name: first.to_string(),
            last_name: String::new(),
            email: format!("{}@example.com", id),
            bio: None,
            avatar: None,
            likes_count: likes,
            rank,
            has_liked: false,
        }
    }

    fn ids(list: &[Marketer]) -> Vec<i64> {
        list.iter().map(|m| m.id.0).collect()
    }

    #[test]
    fn test_top_filter_orders_by_rank_and_drops_unranked() {
        let list = vec![
            marketer(1, "a", None, Some(3)),
            marketer(2, "b", None, Some(1)),
            marketer(3, "c", None, None),
            marketer(4, "d", None, Some(2)),
        ];
        let top = filter_marketers(&list, DirectoryFilter::Top, None);
        let ranks: Vec<u32> = top.iter().filter_map(|m| m.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert!(!ids(&top).contains(&3));
    }

    #[test]
    fn test_top_filter_excludes_rank_beyond_ten() {
        let list = vec![marketer(1, "a", None, Some(11)), marketer(2, "b", None, Some(10))];
        assert_eq!(ids(&filter_marketers(&list, DirectoryFilter::Top, None)), vec![2]);
    }

    #[test]
    fn test_all_filter_sorts_by_likes_desc() {
        let list = vec![
            marketer(1, "a", Some(2), None),
            marketer(2, "b", Some(5), None),
            marketer(3, "c", Some(0), None),
        ];
        let all = filter_marketers(&list, DirectoryFilter::All, None);
        let likes: Vec<u32> = all.iter().map(|m| m.likes()).collect();
        assert_eq!(likes, vec![5, 2, 0]);
    }

    #[test]
    fn test_missing_likes_sort_as_zero() {
        let list = vec![marketer(1, "a", None, None), marketer(2, "b", Some(1), None)];
        assert_eq!(ids(&filter_marketers(&list, DirectoryFilter::All, None)), vec![2, 1]);
    }

    #[test]
    fn test_liked_filter() {
        let mut liked = marketer(1, "a", None, None);
        liked.has_liked = true;
        let list = vec![liked, marketer(2, "b", None, None)];
        assert_eq!(ids(&filter_marketers(&list, DirectoryFilter::Liked, None)), vec![1]);
    }

    #[test]
    fn test_search_matches_name_and_bio() {
        let mut ana = marketer(1, "Ana", None, None);
        ana.last_name = "Gómez".to_string();
        let mut fan = marketer(2, "Marta", None, None);
        fan.bio = Some("Banana enthusiast".to_string());
        let luis = marketer(3, "Luis", None, None);

        let found = filter_marketers(&[ana, fan, luis], DirectoryFilter::All, Some("ANA"));
        let mut found = ids(&found);
        found.sort();
        assert_eq!(found, vec![1, 2]);
    }

    #[test]
    fn test_filter_parses_from_str() {
        assert_eq!("top".parse::<DirectoryFilter>().unwrap(), DirectoryFilter::Top);
        assert_eq!("Liked".parse::<DirectoryFilter>().unwrap(), DirectoryFilter::Liked);
        assert!("best".parse::<DirectoryFilter>().is_err());
        assert_eq!(DirectoryFilter::All.to_string(), "all");
    }

    #[test]
    fn test_render_cards_button_states() {
        let mut liked = marketer(2, "b", Some(1), Some(1));
        liked.has_liked = true;
        let list = vec![marketer(1, "me", Some(3), None), liked, marketer(3, "c", None, None)];
        let stats = UserStats {
            likes_given: 5,
            likes_received: 3,
            remaining_likes: 0,
        };

        let render = render_cards(&list, DirectoryFilter::All, None, Some(UserId(1)), &stats);
        let states: Vec<(i64, ButtonState)> =
            render.cards().iter().map(|c| (c.id.0, c.button)).collect();
        assert_eq!(
            states,
            vec![
                (1, ButtonState::OwnProfile),
                (2, ButtonState::AlreadyLiked),
                (3, ButtonState::QuotaExhausted),
            ]
        );
        assert_eq!(render.cards()[1].rank_badge, Some(RankBadge::Gold));
        assert_eq!(render.cards()[2].bio, NO_BIO);
    }

    #[test]
    fn test_render_empty() {
        let render = render_cards(&[], DirectoryFilter::All, None, None, &UserStats::default());
        assert_eq!(render, DirectoryRender::Empty);
    }
}
