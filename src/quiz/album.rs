//! Questions about individual albums.

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::quiz::error::Result;
use crate::quiz::facts::Album;
use crate::quiz::numeric::nearby_answers;
use crate::quiz::synthesizer::{shortfall, Context};
use crate::quiz::{
    AnswerValue, Question, ALBUM_PLACEHOLDER, FIRST_ALBUM_PLACEHOLDER, SECOND_ALBUM_PLACEHOLDER,
};

// Which album came first: '<album1>' or '<album2>'?
pub fn earlier_of_two(question: &mut Question, ctx: &Context, rng: &mut dyn RngCore) -> Result<()> {
    let albums = sample_albums(question, ctx, rng)?;
    question.substitute(FIRST_ALBUM_PLACEHOLDER, &albums[0].name);
    question.substitute(SECOND_ALBUM_PLACEHOLDER, &albums[1].name);
    fill_earliest(question, albums)
}

// Which of these <artist> albums came out first?
pub fn earliest_of_four(
    question: &mut Question,
    ctx: &Context,
    rng: &mut dyn RngCore,
) -> Result<()> {
    let albums = sample_albums(question, ctx, rng)?;
    fill_earliest(question, albums)
}

// What year did <artist> release <album>?
pub fn release_year(question: &mut Question, ctx: &Context, rng: &mut dyn RngCore) -> Result<()> {
    let Some(album) = ctx.facts.albums.items.choose(rng) else {
        return Err(shortfall(question, "albums", 1, 0));
    };
    question.substitute(ALBUM_PLACEHOLDER, &album.name);

    let correct = album.release_date.year();
    let decoys = nearby_answers(correct, question.answers.len() - 1, rng);
    question.fill(correct.into(), decoys)
}

/// One album per answer slot, with distinct names and distinct release dates
/// so the earliest of them is never a tie. A title listed more than once (a reissue)
/// counts with its earliest release.
fn sample_albums<'a>(
    question: &Question,
    ctx: &'a Context,
    rng: &mut dyn RngCore,
) -> Result<Vec<&'a Album>> {
    let mut by_name: Vec<&Album> = Vec::with_capacity(ctx.facts.albums.items.len());
    for album in &ctx.facts.albums.items {
        match by_name.iter_mut().find(|a| a.name == album.name) {
            Some(kept) if album.release_date < kept.release_date => *kept = album,
            Some(_) => {}
            None => by_name.push(album),
        }
    }

    let mut pool: Vec<&Album> = Vec::with_capacity(by_name.len());
    for album in by_name {
        if !pool.iter().any(|a| a.release_date == album.release_date) {
            pool.push(album);
        }
    }

    let needed = question.answers.len();
    if pool.len() < needed {
        return Err(shortfall(question, "albums with distinct release dates", needed, pool.len()));
    }
    Ok(pool.choose_multiple(rng, needed).copied().collect())
}

fn fill_earliest(question: &mut Question, albums: Vec<&Album>) -> Result<()> {
    let Some(earliest) = albums.iter().min_by(|a, b| a.release_date.cmp(&b.release_date)) else {
        return Err(shortfall(question, "albums", 1, 0));
    };

    let others = albums
        .iter()
        .filter(|a| a.name != earliest.name)
        .map(|a| AnswerValue::from(a.name.as_str()))
        .collect();
    question.fill(earliest.name.as_str().into(), others)
}
