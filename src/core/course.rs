use crate::core::search::{SearchEngine, SearchFilters};
use crate::domain::model::{Resource, SearchHit};
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::Serialize;

/// Parameters for a generated lesson plan. Defaults match the original
/// teaching flow: a funk lesson for beginners with every part enabled.
#[derive(Debug, Clone)]
pub struct CourseRequest {
    pub style: String,
    pub difficulty: String,
    pub include_warmup: bool,
    pub include_theory: bool,
    pub include_application: bool,
    pub include_improvisation: bool,
    pub include_fun: bool,
}

impl Default for CourseRequest {
    fn default() -> Self {
        Self {
            style: "funk".to_string(),
            difficulty: "débutant".to_string(),
            include_warmup: true,
            include_theory: true,
            include_application: true,
            include_improvisation: true,
            include_fun: true,
        }
    }
}

impl Validate for CourseRequest {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("style", &self.style)?;
        validate_non_empty_string("difficulty", &self.difficulty)?;
        Ok(())
    }
}

/// A five-part lesson plan assembled from catalog resources.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoursePlan {
    pub warmup: Vec<Resource>,
    pub theory: Vec<Resource>,
    pub application: Vec<Resource>,
    pub improvisation: Vec<Resource>,
    pub fun: Vec<Resource>,
}

/// Higher-level queries for lesson planning, layered on the search
/// engine: course assembly, recommendations and backing-track lookup.
pub struct CourseBuilder<'a> {
    engine: &'a mut SearchEngine,
}

impl<'a> CourseBuilder<'a> {
    pub fn new(engine: &'a mut SearchEngine) -> Self {
        Self { engine }
    }

    /// Assemble a lesson plan: warmup exercises, theory concepts, one
    /// full song with audio, improvisation vamps and a short iconic riff.
    pub fn build(&mut self, request: &CourseRequest) -> CoursePlan {
        let mut plan = CoursePlan::default();

        if request.include_warmup {
            // Warmups stay at beginner level whatever the lesson targets.
            plan.warmup = self.warmup_exercises(&request.style, 5);
        }

        if request.include_theory {
            let filters = SearchFilters {
                kind: Some("concept".to_string()),
                limit: Some(3),
                ..Default::default()
            };
            plan.theory = resources(self.engine.search(&request.style, &filters));
        }

        if request.include_application {
            let filters = SearchFilters {
                kind: Some("song".to_string()),
                style: Some(request.style.clone()),
                difficulty: Some(request.difficulty.clone()),
                only_mp3: true,
                limit: Some(1),
                ..Default::default()
            };
            plan.application = resources(self.engine.search("", &filters));
        }

        if request.include_improvisation {
            let filters = SearchFilters {
                kind: Some("exercise".to_string()),
                style: Some(request.style.clone()),
                only_mp3: true,
                limit: Some(2),
                ..Default::default()
            };
            plan.improvisation = resources(self.engine.search("vamp", &filters));
        }

        if request.include_fun {
            let filters = SearchFilters {
                kind: Some("exercise".to_string()),
                style: Some(request.style.clone()),
                limit: Some(1),
                ..Default::default()
            };
            plan.fun = resources(self.engine.search("riff", &filters));
        }

        plan
    }

    /// Resources sharing kind, style and difficulty with the given one,
    /// the reference itself excluded.
    pub fn recommendations(&mut self, id: &str, limit: usize) -> Result<Vec<Resource>> {
        let reference = self
            .engine
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownResource { id: id.to_string() })?;

        let filters = SearchFilters {
            kind: (!reference.kind.is_empty()).then(|| reference.kind.clone()),
            style: reference.metadata.style.clone(),
            difficulty: reference.metadata.difficulty.clone(),
            ..Default::default()
        };

        let mut recommendations = resources(self.engine.search("", &filters));
        recommendations.retain(|r| r.id != reference.id);
        recommendations.truncate(limit);
        Ok(recommendations)
    }

    /// Backing tracks: audio resources matching "backing" in the given
    /// style, optionally narrowed to one musical key.
    pub fn backing_tracks(&mut self, style: &str, key: Option<&str>) -> Vec<Resource> {
        let filters = SearchFilters {
            style: Some(style.to_string()),
            only_mp3: true,
            ..Default::default()
        };

        let mut tracks = resources(self.engine.search("backing", &filters));
        if let Some(key) = key {
            tracks.retain(|t| t.metadata.key.as_deref() == Some(key));
        }
        tracks
    }

    /// Beginner exercises in a style, for the start of a lesson.
    pub fn warmup_exercises(&mut self, style: &str, count: usize) -> Vec<Resource> {
        let filters = SearchFilters {
            kind: Some("exercise".to_string()),
            style: Some(style.to_string()),
            difficulty: Some("débutant".to_string()),
            limit: Some(count),
            ..Default::default()
        };
        resources(self.engine.search("", &filters))
    }

    /// Full songs in a style, optionally at one difficulty, audio
    /// required by default.
    pub fn complete_songs(
        &mut self,
        style: &str,
        difficulty: Option<&str>,
        require_mp3: bool,
    ) -> Vec<Resource> {
        let filters = SearchFilters {
            kind: Some("song".to_string()),
            style: Some(style.to_string()),
            difficulty: difficulty.map(str::to_string),
            only_mp3: require_mp3,
            ..Default::default()
        };
        resources(self.engine.search("", &filters))
    }
}

fn resources(hits: Vec<SearchHit>) -> Vec<Resource> {
    hits.into_iter().map(|h| h.resource).collect()
}
