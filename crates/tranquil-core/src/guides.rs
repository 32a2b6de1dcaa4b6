//! Pictogram guides: short step-by-step walkthroughs of daily activities.
//!
//! The catalog is built in and read-only. A [`GuideNavigator`] tracks the
//! step a user is on; it is serializable so a host can keep it between
//! invocations the same way it keeps the breathing engine.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, Result, ValidationError};
use crate::events::Event;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideStep {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guide {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub steps: Vec<GuideStep>,
}

type StepDef = (&'static str, &'static str, &'static str);

struct GuideDef {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    steps: &'static [StepDef],
}

const CATALOG: &[GuideDef] = &[
    GuideDef {
        id: "brush-teeth",
        title: "Brushing teeth",
        description: "Keep your teeth clean and healthy",
        icon: "🪥",
        steps: &[
            ("Get your things", "Take your toothbrush and toothpaste", "🧴"),
            ("Add toothpaste", "Put a pea-sized amount on the brush", "🫛"),
            ("Brush the front", "Brush the front teeth in small circles", "😁"),
            ("Brush the back", "Brush the back teeth, top and bottom", "🦷"),
            ("Rinse", "Spit and rinse your mouth with water", "💧"),
            ("Clean up", "Rinse the brush and put everything away", "✨"),
        ],
    },
    GuideDef {
        id: "wash-hands",
        title: "Washing hands",
        description: "Wash away germs before eating and after the bathroom",
        icon: "🧼",
        steps: &[
            ("Wet your hands", "Turn on the tap and wet both hands", "🚰"),
            ("Use soap", "Put soap on your hands", "🧼"),
            ("Scrub", "Rub palms, backs and fingers for 20 seconds", "👐"),
            ("Rinse", "Rinse all the soap off", "💦"),
            ("Dry", "Dry your hands with a towel", "🧻"),
        ],
    },
    GuideDef {
        id: "get-dressed",
        title: "Getting dressed",
        description: "Put your clothes on in order",
        icon: "👕",
        steps: &[
            ("Pick clothes", "Choose clothes for today's weather", "🌤️"),
            ("Underwear and socks", "Put on underwear and socks first", "🧦"),
            ("Trousers", "Put on your trousers or skirt", "👖"),
            ("Top", "Put on your shirt or sweater", "👕"),
            ("Shoes", "Put on your shoes and fasten them", "👟"),
        ],
    },
    GuideDef {
        id: "calm-down",
        title: "Calming down",
        description: "What to do when everything feels like too much",
        icon: "🌿",
        steps: &[
            ("Stop", "Stop what you are doing", "✋"),
            ("Find a quiet place", "Go somewhere calm if you can", "🏠"),
            ("Breathe", "Breathe in slowly, then breathe out slowly", "🌬️"),
            ("Name the feeling", "Say or point to how you feel", "💬"),
            ("Ask for help", "Tell someone you trust if you need help", "🙋"),
        ],
    },
];

impl GuideDef {
    fn to_guide(&self) -> Guide {
        Guide {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            steps: self
                .steps
                .iter()
                .enumerate()
                .map(|(i, (title, description, icon))| GuideStep {
                    id: (i + 1).to_string(),
                    title: (*title).to_string(),
                    description: (*description).to_string(),
                    icon: (*icon).to_string(),
                })
                .collect(),
        }
    }
}

pub fn built_in_guides() -> Vec<Guide> {
    CATALOG.iter().map(GuideDef::to_guide).collect()
}

pub fn find_guide(id: &str) -> Result<Guide> {
    CATALOG
        .iter()
        .find(|g| g.id == id)
        .map(GuideDef::to_guide)
        .ok_or_else(|| CoreError::not_found("guide", id))
}

/// Position within one guide. `next_step` and `previous_step` stop at the ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredNavigator")]
pub struct GuideNavigator {
    guide: Guide,
    current: usize,
}

#[derive(Deserialize)]
struct StoredNavigator {
    guide: Guide,
    current: usize,
}

impl TryFrom<StoredNavigator> for GuideNavigator {
    type Error = ValidationError;

    fn try_from(stored: StoredNavigator) -> Result<Self, Self::Error> {
        let mut nav = Self::open(stored.guide)?;
        if stored.current >= nav.step_count() {
            return Err(ValidationError::OutOfRange {
                field: "guide.current".into(),
                min: 0,
                max: nav.step_count() as u64 - 1,
                value: stored.current as u64,
            });
        }
        nav.current = stored.current;
        Ok(nav)
    }
}

impl GuideNavigator {
    /// Open `guide` at its first step.
    ///
    /// # Errors
    /// Returns an error when the guide has no steps.
    pub fn open(guide: Guide) -> Result<Self, ValidationError> {
        if guide.steps.is_empty() {
            return Err(ValidationError::Empty("guide.steps".into()));
        }
        Ok(Self { guide, current: 0 })
    }

    pub fn guide(&self) -> &Guide {
        &self.guide
    }

    pub fn current_step(&self) -> &GuideStep {
        &self.guide.steps[self.current]
    }

    /// 1-based.
    pub fn step_number(&self) -> usize {
        self.current + 1
    }

    pub fn step_count(&self) -> usize {
        self.guide.steps.len()
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    /// Reaching the last step completes the guide.
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.step_count()
    }

    /// "Step n of N"
    pub fn label(&self) -> String {
        format!("Step {} of {}", self.step_number(), self.step_count())
    }

    /// Percentage of steps reached, counting the current one.
    pub fn progress(&self) -> f64 {
        self.step_number() as f64 * 100.0 / self.step_count() as f64
    }

    /// `None` on the last step.
    pub fn next_step(&mut self) -> Option<Event> {
        if self.is_last() {
            return None;
        }
        self.current += 1;
        Some(self.step_changed())
    }

    /// `None` on the first step.
    pub fn previous_step(&mut self) -> Option<Event> {
        if self.is_first() {
            return None;
        }
        self.current -= 1;
        Some(self.step_changed())
    }

    fn step_changed(&self) -> Event {
        debug!(guide = %self.guide.id, step = self.step_number(), "guide step changed");
        Event::GuideStepChanged {
            guide_id: self.guide.id.clone(),
            step_number: self.step_number(),
            step_count: self.step_count(),
            progress: self.progress(),
            completed: self.is_last(),
            at: Utc::now(),
        }
    }
}
