use std::fmt::Write;

use cn_analysis::PipelineOutput;

/// Markdown report: one block per article, then the comparative section.
pub fn render_markdown(output: &PipelineOutput) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "### Processed {} articles for {}:\n\n",
        output.articles.len(),
        output.query
    );

    for (i, article) in output.articles.iter().enumerate() {
        let _ = write!(
            out,
            "**{}. Title:** {}\n**Summary:** {}\n**Sentiment:** {}\n**Link:** [{}]({})\n\n",
            i + 1,
            article.title,
            article.summary.text(),
            article.sentiment.label(),
            article.link,
            article.link
        );
    }

    if let Some(report) = &output.report {
        out.push_str("### Comparative Analysis:\n");
        let _ = writeln!(out, "**Company:** {}", report.company);
        out.push_str("**Sentiment Distribution:**\n");
        for (label, count) in report.sentiment_distribution.iter() {
            let _ = writeln!(out, "  {}: {}", label, count);
        }
        let _ = writeln!(out, "**Common Topics:** {}", report.common_topics.join(", "));
        out.push_str("**Insights:**\n");
        for insight in &report.insights {
            let _ = writeln!(out, "  - {}", insight);
        }
    }

    if let Some(audio) = &output.audio {
        let _ = writeln!(out, "**Audio ({}):** {}", audio.language, audio.path.display());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cn_core::{
        AnalyzedArticle, AudioArtifact, ComparativeReport, Outcome, RawArticle, Sentiment,
        SentimentDistribution,
    };
    use std::path::PathBuf;

    fn output(report: Option<ComparativeReport>) -> PipelineOutput {
        let articles = vec![
            AnalyzedArticle::from_raw(
                RawArticle::new("Tesla beats estimates", "https://example.com/1"),
                Outcome::Value("Deliveries rose.".to_string()),
                Outcome::Value(Sentiment::Positive),
            ),
            AnalyzedArticle::from_raw(
                RawArticle::new("Tesla recall", "https://example.com/2"),
                Outcome::Degraded("Error fetching summary: timeout".to_string()),
                Outcome::Value(Sentiment::Neutral),
            ),
        ];
        PipelineOutput {
            query: "Tesla".to_string(),
            articles,
            report,
            audio: None,
            warnings: vec![],
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_articles_and_report() {
        let mut distribution = SentimentDistribution::new();
        distribution.increment("Positive");
        distribution.increment("Neutral");
        let report = ComparativeReport {
            company: "Tesla".to_string(),
            sentiment_distribution: distribution,
            common_topics: vec!["tesla".to_string(), "deliveries".to_string()],
            insights: vec!["Coverage is mixed.".to_string()],
        };

        let mut output = output(Some(report));
        output.audio = Some(AudioArtifact {
            path: PathBuf::from("/tmp/report.mp3"),
            language: "hi".to_string(),
            bytes: 10,
        });
        let text = render_markdown(&output);

        assert!(text.starts_with("### Processed 2 articles for Tesla:\n\n"));
        assert!(text.contains(
            "**1. Title:** Tesla beats estimates\n**Summary:** Deliveries rose.\n**Sentiment:** Positive\n**Link:** [https://example.com/1](https://example.com/1)\n\n"
        ));
        assert!(text.contains("**Summary:** Error fetching summary: timeout\n"));
        assert!(text.contains("**Sentiment Distribution:**\n  Positive: 1\n  Neutral: 1\n"));
        assert!(text.contains("**Common Topics:** tesla, deliveries\n"));
        assert!(text.contains("**Insights:**\n  - Coverage is mixed.\n"));
        assert!(text.ends_with("**Audio (hi):** /tmp/report.mp3\n"));
    }

    #[test]
    fn test_render_without_report() {
        let text = render_markdown(&output(None));
        assert!(text.contains("**2. Title:** Tesla recall"));
        assert!(!text.contains("Comparative Analysis"));
    }
}
