use std::collections::HashMap;

use log::{debug, error, info, warn};
use rand::RngCore;

use crate::quiz::catalog::Catalogs;
use crate::quiz::error::{QuizError, Result};
use crate::quiz::facts::ArtistFacts;
use crate::quiz::templates::{QuestionTemplates, TemplateSet};
use crate::quiz::{album, artist, Question, Quiz, ARTIST_PLACEHOLDER};

/// Read-only inputs every answer handler can draw from.
pub struct Context<'f> {
    pub facts: &'f ArtistFacts,
    pub catalogs: &'f Catalogs,
}

impl<'f> Context<'f> {
    pub fn new(facts: &'f ArtistFacts, catalogs: &'f Catalogs) -> Self {
        Self { facts, catalogs }
    }
}

/// Fills the answer slots of one question, substituting any placeholders it owns.
pub type Handler = fn(&mut Question, &Context, &mut dyn RngCore) -> Result<()>;

pub fn shortfall(
    question: &Question,
    what: &'static str,
    needed: usize,
    available: usize,
) -> QuizError {
    QuizError::InsufficientData {
        set: question.set,
        id: question.id,
        what,
        needed,
        available,
    }
}

pub struct Synthesizer {
    handlers: HashMap<(TemplateSet, u32), Handler>,
}

impl Default for Synthesizer {
    fn default() -> Self {
        let mut synthesizer = Self::new();
        synthesizer
            .register(TemplateSet::Artist, 0, artist::genre)
            .register(TemplateSet::Artist, 1, artist::top_track)
            .register(TemplateSet::Artist, 2, artist::listening_history)
            .register(TemplateSet::Artist, 3, artist::album_count)
            .register(TemplateSet::Artist, 4, artist::first_album_year)
            .register(TemplateSet::Artist, 5, artist::real_song)
            .register(TemplateSet::Album, 1, album::earlier_of_two)
            .register(TemplateSet::Album, 3, album::release_year)
            .register(TemplateSet::Album, 4, album::earliest_of_four);
        synthesizer
    }
}

impl Synthesizer {
    /// A synthesizer with no handlers, see [`Synthesizer::default`] for the built-in ones.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register(&mut self, set: TemplateSet, id: u32, handler: Handler) -> &mut Self {
        self.handlers.insert((set, id), handler);
        self
    }

    pub fn handles(&self, set: TemplateSet, id: u32) -> bool {
        self.handlers.contains_key(&(set, id))
    }

    /// Fills every template it has a handler for and returns the finished questions,
    /// in template order.
    ///
    /// Questions the facts can't support are skipped with a warning, ids without a
    /// handler are left unfilled and not returned. Any other error aborts the quiz.
    pub fn synthesize(
        &self,
        ctx: &Context,
        templates: Vec<Question>,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Question>> {
        let mut questions = Vec::with_capacity(templates.len());

        for mut question in templates {
            let Some(handler) = self.handlers.get(&(question.set, question.id)) else {
                warn!(
                    "No answers for {} question {}, leaving it out",
                    question.set, question.id
                );
                continue;
            };

            question.substitute(ARTIST_PLACEHOLDER, &ctx.facts.name);
            match handler(&mut question, ctx, rng).and_then(|_| question.check()) {
                Ok(()) => {
                    debug!("Filled {} question {}: {}", question.set, question.id, question.text);
                    questions.push(question);
                }
                Err(e) if e.is_skippable() => {
                    warn!("Skipping question: {}", e);
                }
                Err(e @ QuizError::Invariant { .. }) => {
                    if cfg!(debug_assertions) {
                        panic!("{}", e);
                    }
                    error!("Dropping question: {}", e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(questions)
    }

    /// Builds a whole quiz for one artist: artist questions first, then album questions.
    pub fn generate_quiz(
        &self,
        facts: &ArtistFacts,
        templates: &QuestionTemplates,
        catalogs: &Catalogs,
        rng: &mut dyn RngCore,
    ) -> Result<Quiz> {
        let ctx = Context::new(facts, catalogs);

        let mut questions = self.synthesize(&ctx, templates.load(TemplateSet::Artist), rng)?;
        questions.extend(self.synthesize(&ctx, templates.load(TemplateSet::Album), rng)?);

        info!("Generated {} questions about {}", questions.len(), facts.name);
        Ok(Quiz::new(facts.name.clone(), questions))
    }
}

pub fn generate_quiz(
    facts: &ArtistFacts,
    templates: &QuestionTemplates,
    catalogs: &Catalogs,
    rng: &mut dyn RngCore,
) -> Result<Quiz> {
    Synthesizer::default().generate_quiz(facts, templates, catalogs, rng)
}
