use std::fmt;

use serde::{Deserialize, Serialize};

/// Post category (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Event,
    Notice,
    Guide,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Event, Category::Notice, Category::Guide];

    pub fn parse_category(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "event" => Some(Category::Event),
            "notice" => Some(Category::Notice),
            "guide" => Some(Category::Guide),
            _ => None,
        }
    }

    /// The next category in display order, wrapping around
    pub fn next(self) -> Self {
        match self {
            Category::Event => Category::Notice,
            Category::Notice => Category::Guide,
            Category::Guide => Category::Event,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Category::Event => Category::Guide,
            Category::Notice => Category::Event,
            Category::Guide => Category::Notice,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Event => write!(f, "Event"),
            Category::Notice => write!(f, "Notice"),
            Category::Guide => write!(f, "Guide"),
        }
    }
}

/// A promotion, notice, or guide shown in the public feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: Category,
    /// ISO date (`YYYY-MM-DD`)
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// An in-progress post edit. An empty `id` means "new post".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostDraft {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: Option<Category>,
    pub image_url: String,
}

impl PostDraft {
    /// A blank draft for a new post (category defaults to Event)
    pub fn new_post() -> Self {
        PostDraft {
            category: Some(Category::Event),
            ..Default::default()
        }
    }

    pub fn from_post(post: &Post) -> Self {
        PostDraft {
            id: post.id.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            category: Some(post.category),
            image_url: post.image_url.clone().unwrap_or_default(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }
}

/// Seed posts used when nothing has been persisted yet
pub fn default_posts() -> Vec<Post> {
    vec![
        Post {
            id: "1".into(),
            title: "신규 회원 첫 입금 20% 보너스 이벤트".into(),
            content: "FANTASTIC CLARK에 새로 가입하신 회원님들을 위해 첫 입금 시 최대 20%의 보너스를 즉시 지급해 드립니다. 지금 바로 최고의 혜택을 경험하세요.".into(),
            category: Category::Event,
            date: "2024-05-20".into(),
            image_url: Some("https://picsum.photos/seed/casino1/800/400".into()),
        },
        Post {
            id: "2".into(),
            title: "VIP 골프 & 호텔 패키지 안내".into(),
            content: "클락 지역 최고의 골프장과 5성급 호텔 숙박권을 포함한 VIP 전용 투어 패키지를 운영 중입니다. 에이전시를 통해 예약 시 특별 할인가가 적용됩니다.".into(),
            category: Category::Guide,
            date: "2024-05-18".into(),
            image_url: Some("https://picsum.photos/seed/golf/800/400".into()),
        },
        Post {
            id: "3".into(),
            title: "시스템 점검 및 보안 업데이트 공지".into(),
            content: "안정적인 서비스 이용을 위해 매주 수요일 새벽 3시부터 5시까지 정기 시스템 점검이 진행됩니다. 이용에 참고 부탁드립니다.".into(),
            category: Category::Notice,
            date: "2024-05-15".into(),
            image_url: Some("https://picsum.photos/seed/security/800/400".into()),
        },
    ]
}
