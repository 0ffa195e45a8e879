//! Questions about the artist as a whole.

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::quiz::error::Result;
use crate::quiz::numeric::nearby_answers;
use crate::quiz::synthesizer::{shortfall, Context};
use crate::quiz::{AnswerValue, Question};

// What genre is <artist> associated with?
pub fn genre(question: &mut Question, ctx: &Context, rng: &mut dyn RngCore) -> Result<()> {
    let Some(correct) = ctx.facts.genres.first() else {
        return Err(shortfall(question, "genres", 1, 0));
    };

    let decoys = ctx
        .catalogs
        .genre_decoys(correct, question.answers.len() - 1, rng)
        .into_iter()
        .map(AnswerValue::Text)
        .collect();
    question.fill(correct.as_str().into(), decoys)
}

// Which is <artist>'s most popular song?
pub fn top_track(question: &mut Question, ctx: &Context, rng: &mut dyn RngCore) -> Result<()> {
    let needed = question.answers.len();
    let Some(correct) = ctx.facts.top_tracks.first().map(|t| t.name.as_str()) else {
        return Err(shortfall(question, "top tracks", needed, 0));
    };

    // The next most popular tracks, skipping repeated titles so no two choices look the same
    let mut others: Vec<&str> = Vec::with_capacity(needed - 1);
    for track in &ctx.facts.top_tracks[1..] {
        if others.len() == needed - 1 {
            break;
        }
        if track.name != correct && !others.contains(&track.name.as_str()) {
            others.push(&track.name);
        }
    }
    if others.len() < needed - 1 {
        return Err(shortfall(question, "distinct top tracks", needed, others.len() + 1));
    }
    others.shuffle(rng);

    question.fill(correct.into(), others.into_iter().map(AnswerValue::from).collect())
}

// True or False: A song by <artist> is in your top 10 most listened-to songs of all time.
pub fn listening_history(
    question: &mut Question,
    ctx: &Context,
    _rng: &mut dyn RngCore,
) -> Result<()> {
    let Some(found) = ctx.facts.in_user_top_tracks() else {
        return Err(shortfall(question, "listening history entries", 1, 0));
    };
    question.fill(found.into(), vec![(!found).into()])
}

// How many albums has <artist> released?
pub fn album_count(question: &mut Question, ctx: &Context, rng: &mut dyn RngCore) -> Result<()> {
    let correct = i64::from(ctx.facts.albums.total);
    let decoys = nearby_answers(correct, question.answers.len() - 1, rng);
    question.fill(correct.into(), decoys)
}

// In what year did <artist> release their first album?
pub fn first_album_year(
    question: &mut Question,
    ctx: &Context,
    rng: &mut dyn RngCore,
) -> Result<()> {
    let albums = &ctx.facts.albums;
    let Some(first) = albums.first_release() else {
        return Err(shortfall(
            question,
            "albums listed",
            (albums.total as usize).max(1),
            albums.items.len(),
        ));
    };

    let correct = first.release_date.year();
    let decoys = nearby_answers(correct, question.answers.len() - 1, rng);
    question.fill(correct.into(), decoys)
}

// Which of these is a real song by <artist>?
pub fn real_song(question: &mut Question, ctx: &Context, rng: &mut dyn RngCore) -> Result<()> {
    let Some(track) = ctx.facts.top_tracks.choose(rng) else {
        return Err(shortfall(question, "top tracks", 1, 0));
    };

    // None of the decoys may be one of the artist's own songs
    let real = ctx
        .facts
        .top_tracks
        .iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>();
    let needed = question.answers.len() - 1;
    let decoys = ctx.catalogs.song_decoys(&real, needed, rng);
    if decoys.len() < needed {
        return Err(shortfall(question, "decoy song names", needed, decoys.len()));
    }

    let decoys = decoys.into_iter().map(AnswerValue::Text).collect();
    question.fill(track.name.as_str().into(), decoys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::catalog::Catalogs;
    use crate::quiz::error::QuizError;
    use crate::quiz::facts::{ArtistCredit, ArtistFacts, Track, UserTrack};
    use crate::quiz::templates::TemplateSet;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn facts() -> ArtistFacts {
        ArtistFacts {
            name: "Radiohead".to_string(),
            genres: vec!["art rock".to_string(), "alternative rock".to_string()],
            top_tracks: ["Creep", "No Surprises", "Karma Police", "High and Dry", "Reckoner"]
                .iter()
                .map(|name| Track {
                    name: name.to_string(),
                })
                .collect(),
            ..Default::default()
        }
    }

    fn catalogs() -> Catalogs {
        Catalogs::embedded().unwrap()
    }

    fn question(id: u32, slots: usize) -> Question {
        Question::new(TemplateSet::Artist, id, "Question about <artist>".into(), slots, 0)
    }

    fn values(question: &Question) -> Vec<AnswerValue> {
        question.answers.iter().filter_map(|a| a.value.clone()).collect()
    }

    #[test]
    fn test_genre_uses_primary_genre() {
        let (facts, catalogs) = (facts(), catalogs());
        let ctx = Context::new(&facts, &catalogs);
        let mut q = question(0, 4);
        genre(&mut q, &ctx, &mut StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(q.correct_answer(), Some(&AnswerValue::from("art rock")));
        for decoy in &values(&q)[1..] {
            let AnswerValue::Text(name) = decoy else {
                panic!("Expected a genre name, got {:?}", decoy);
            };
            assert!(catalogs.genres.contains(name));
        }
        q.substitute("<artist>", "Radiohead");
        q.check().unwrap();
    }

    #[test]
    fn test_top_track_picks_next_three() {
        let (facts, catalogs) = (facts(), catalogs());
        let ctx = Context::new(&facts, &catalogs);
        let mut q = question(1, 4);
        top_track(&mut q, &ctx, &mut StdRng::seed_from_u64(1)).unwrap();

        let mut choices = values(&q);
        assert_eq!(choices[0], AnswerValue::from("Creep"));
        choices.remove(0);
        for expected in ["No Surprises", "Karma Police", "High and Dry"] {
            assert!(choices.contains(&expected.into()));
        }
    }

    #[test]
    fn test_top_track_needs_four_distinct_titles() {
        let mut facts = facts();
        facts.top_tracks.truncate(3);
        facts.top_tracks.push(Track {
            name: "Karma Police".to_string(),
        });
        let catalogs = catalogs();
        let ctx = Context::new(&facts, &catalogs);

        let err = top_track(&mut question(1, 4), &ctx, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(
            err,
            QuizError::InsufficientData { id: 1, needed: 4, available: 3, .. }
        ));
    }

    #[test]
    fn test_listening_history_true_and_false() {
        let mut facts = facts();
        facts.user_top_tracks = Some(vec![UserTrack {
            name: "Reckoner".to_string(),
            artists: vec![ArtistCredit {
                name: "Radiohead".to_string(),
            }],
        }]);
        let catalogs = catalogs();

        let mut q = question(2, 2);
        listening_history(&mut q, &Context::new(&facts, &catalogs), &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(values(&q), vec![AnswerValue::Bool(true), AnswerValue::Bool(false)]);

        facts.name = "Portishead".to_string();
        let mut q = question(2, 2);
        listening_history(&mut q, &Context::new(&facts, &catalogs), &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(values(&q), vec![AnswerValue::Bool(false), AnswerValue::Bool(true)]);

        facts.user_top_tracks = None;
        let result = listening_history(
            &mut question(2, 2),
            &Context::new(&facts, &catalogs),
            &mut StdRng::seed_from_u64(1),
        );
        assert!(result.unwrap_err().is_skippable());
    }

    #[test]
    fn test_real_song_mixes_one_real_title_with_decoys() {
        let (facts, catalogs) = (facts(), catalogs());
        let ctx = Context::new(&facts, &catalogs);
        let mut q = question(5, 4);
        real_song(&mut q, &ctx, &mut StdRng::seed_from_u64(9)).unwrap();

        let real = facts
            .top_tracks
            .iter()
            .map(|t| AnswerValue::from(t.name.as_str()))
            .collect::<Vec<_>>();
        let choices = values(&q);
        assert!(real.contains(&choices[0]));
        assert!(choices[1..].iter().all(|c| !real.contains(c)));
    }

    #[test]
    fn test_real_song_decoys_exclude_all_top_tracks() {
        let facts = facts();
        let catalogs = Catalogs::new(
            vec!["rock".into(), "pop".into(), "jazz".into(), "folk".into()],
            ["Karma Police", "Reckoner", "Glass Harbor", "Static Bloom", "Copper Skies"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
        .unwrap();
        let ctx = Context::new(&facts, &catalogs);

        for seed in 0..20 {
            let mut q = question(5, 4);
            real_song(&mut q, &ctx, &mut StdRng::seed_from_u64(seed)).unwrap();

            let real_count = values(&q)
                .iter()
                .filter(|v| facts.top_tracks.iter().any(|t| **v == AnswerValue::from(t.name.as_str())))
                .count();
            assert_eq!(real_count, 1);
        }
    }

    #[test]
    fn test_real_song_without_enough_decoys_is_skipped() {
        let facts = facts();
        let catalogs = Catalogs::new(
            vec!["rock".into(), "pop".into(), "jazz".into(), "folk".into()],
            ["Creep", "Reckoner", "Karma Police", "Glass Harbor"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
        .unwrap();
        let result = real_song(
            &mut question(5, 4),
            &Context::new(&facts, &catalogs),
            &mut StdRng::seed_from_u64(1),
        );
        assert!(matches!(
            result,
            Err(QuizError::InsufficientData { id: 5, needed: 3, available: 1, .. })
        ));
    }

    #[test]
    fn test_real_song_without_tracks_is_skipped() {
        let mut facts = facts();
        facts.top_tracks.clear();
        let catalogs = catalogs();
        let result = real_song(
            &mut question(5, 4),
            &Context::new(&facts, &catalogs),
            &mut StdRng::seed_from_u64(1),
        );
        assert!(matches!(result, Err(QuizError::InsufficientData { id: 5, .. })));
    }
}
