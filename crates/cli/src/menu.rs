use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use yatra_agents::{SpeakFileError, TourismCompanion};
use yatra_core::{clamp_days, parse_interests, ItineraryRequest, DEFAULT_BUDGET, DEFAULT_DAYS};
use yatra_dashboard::render_table;
use yatra_storage::ArtifactStore;

pub async fn run_menu<S, R, W>(
    companion: &TourismCompanion<S>,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    S: ArtifactStore,
    R: BufRead,
    W: Write,
{
    writeln!(out, "\n=== Yatra: Smart Tourism Companion ===")?;
    writeln!(out, "1. Generate AI Itinerary")?;
    writeln!(out, "2. Translate Monument Description")?;
    writeln!(out, "3. Generate Tourism Insights Dashboard")?;
    writeln!(out, "4. Text-to-Speech for text file")?;
    writeln!(out, "0. Exit")?;
    if !companion.remote_enabled() {
        writeln!(
            out,
            "(offline mode: set YATRA_HF_TOKEN to enable AI generation and translation)"
        )?;
    }

    loop {
        let Some(choice) = prompt(input, out, "\nChoose option (0/1/2/3/4): ")? else {
            break;
        };

        match choice.as_str() {
            "0" => {
                writeln!(out, "Goodbye")?;
                break;
            }
            "1" => plan_itinerary(companion, input, out).await?,
            "2" => translate(companion, input, out).await?,
            "3" => dashboard(companion, input, out).await?,
            "4" => speak_file(companion, input, out).await?,
            _ => writeln!(out, "Invalid choice. Please enter 0,1,2,3 or 4.")?,
        }
    }

    Ok(())
}

async fn plan_itinerary<S, R, W>(
    companion: &TourismCompanion<S>,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    S: ArtifactStore,
    R: BufRead,
    W: Write,
{
    let budget = parse_or(
        &answer(input, out, "Enter your budget (₹) [default 12000]: ")?,
        DEFAULT_BUDGET,
    );
    let days = parse_days(&answer(input, out, "Number of travel days [default 3]: ")?);
    let interests = parse_interests(&answer(
        input,
        out,
        "Enter interests (comma separated) [heritage, food]: ",
    )?);

    writeln!(out, "\nGenerating itinerary ... (this may take a while)")?;
    let outcome = companion
        .plan_itinerary(ItineraryRequest {
            budget,
            days,
            interests,
        })
        .await?;

    writeln!(out, "Cities: {}", outcome.cities.join(", "))?;
    if outcome.used_fallback {
        writeln!(out, "Using fallback itinerary (AI text too short).")?;
    }
    match &outcome.saved_to {
        Some(path) => writeln!(out, "\nItinerary saved to: {}", path.display())?,
        None => writeln!(out, "\nCould not save itinerary.")?,
    }
    writeln!(out, "\nGenerated Itinerary:\n")?;
    writeln!(out, "{}", outcome.text)?;
    Ok(())
}

async fn translate<S, R, W>(
    companion: &TourismCompanion<S>,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    S: ArtifactStore,
    R: BufRead,
    W: Write,
{
    let text = answer(input, out, "Enter English description (single line or paste): ")?;
    if text.is_empty() {
        writeln!(out, "No text provided.")?;
        return Ok(());
    }
    let lang = or_default(
        answer(input, out, "Translate to (hi/fr/es) [hi]: ")?.to_lowercase(),
        "hi",
    );

    writeln!(out, "\nTranslating text...")?;
    let outcome = match companion.translate(&text, &lang).await {
        Ok(outcome) => outcome,
        Err(error) => {
            writeln!(out, "Error during translation: {error}")?;
            return Ok(());
        }
    };

    if !outcome.translated {
        writeln!(out, "Translation failed; keeping the original text.")?;
    }
    writeln!(out, "\nTranslated text ({lang}):\n{}", outcome.text)?;

    if !yes_no(
        &answer(input, out, "Save translated text to file? (y/n) [y]: ")?,
        true,
    ) {
        return Ok(());
    }
    match companion.save_translation(&outcome).await {
        Ok(path) => writeln!(out, "Saved translation to {}", path.display())?,
        Err(error) => {
            writeln!(out, "Error during translation: {error:#}")?;
            return Ok(());
        }
    }

    if yes_no(
        &answer(input, out, "Also generate audio file? (y/n) [n]: ")?,
        false,
    ) {
        writeln!(out, "\nGenerating audio file...")?;
        match companion.speak_translation(&outcome).await {
            Some(path) => writeln!(out, "Audio saved as {}", path.display())?,
            None => writeln!(out, "TTS generation failed.")?,
        }
    }
    Ok(())
}

async fn dashboard<S, R, W>(
    companion: &TourismCompanion<S>,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    S: ArtifactStore,
    R: BufRead,
    W: Write,
{
    writeln!(out, "\nTourism Insights Dashboard")?;
    let theme = answer(
        input,
        out,
        "Enter tourism theme (heritage/food/desert/adventure/nature/shopping): ",
    )?;

    let report = match companion.build_dashboard(&theme).await {
        Ok(report) => report,
        Err(error) => {
            writeln!(out, "Dashboard generation failed: {error:#}")?;
            return Ok(());
        }
    };

    if !report.theme_recognized {
        writeln!(out, "Unknown theme. Showing generic 'heritage' data.")?;
    }
    writeln!(out, "\nSaved insights CSV: {}", report.csv_path.display())?;
    writeln!(out, "\nTop results:\n{}", render_table(&report.rows))?;
    for chart in &report.charts {
        writeln!(out, "Saved chart: {}", chart.display())?;
    }
    if report.charts.len() < 3 {
        writeln!(out, "Some charts could not be rendered; see the log for details.")?;
    }
    writeln!(out, "\nAI Tourism Insight Summary:\n{}", report.summary)?;
    writeln!(out, "Saved summary: {}", report.summary_path.display())?;
    writeln!(
        out,
        "\nDashboard and charts saved in folder: {}",
        report.folder.display()
    )?;
    Ok(())
}

async fn speak_file<S, R, W>(
    companion: &TourismCompanion<S>,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    S: ArtifactStore,
    R: BufRead,
    W: Write,
{
    let path = answer(input, out, "Enter path to text file to convert to speech: ")?;
    if !Path::new(&path).is_file() {
        writeln!(out, "File not found.")?;
        return Ok(());
    }
    let lang = or_default(
        answer(input, out, "Audio language code (hi/en/fr/es) [en]: ")?,
        "en",
    );

    writeln!(out, "\nGenerating audio file...")?;
    match companion.speak_text_file(Path::new(&path), &lang).await {
        Ok(Some(audio)) => writeln!(out, "Audio saved as {}", audio.display())?,
        Ok(None) => writeln!(out, "TTS generation failed.")?,
        Err(SpeakFileError::NotFound(_)) => writeln!(out, "File not found.")?,
        Err(SpeakFileError::Empty(_)) => writeln!(out, "File is empty.")?,
        Err(error) => writeln!(out, "{error}")?,
    }
    Ok(())
}

/// `None` once input is exhausted.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn answer<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<String> {
    Ok(prompt(input, out, label)?.unwrap_or_default())
}

fn parse_or<T: FromStr>(value: &str, default: T) -> T {
    value.trim().parse().unwrap_or(default)
}

/// Any integer is clamped into range; only non-numeric input takes the default.
fn parse_days(value: &str) -> u8 {
    value
        .trim()
        .parse::<i64>()
        .map(clamp_days)
        .unwrap_or(DEFAULT_DAYS)
}

fn or_default(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value
    }
}

fn yes_no(value: &str, default: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    }
}
