use leptos::prelude::*;

use crate::api::SearchResult;

/// Score with three decimals, or `"N/A"` when there is nothing finite to show.
pub fn format_score(score: Option<f64>) -> String {
	match score {
		Some(s) if s.is_finite() => format!("{s:.3}"),
		_ => "N/A".to_string(),
	}
}

#[component]
pub fn ResultCard(result: SearchResult) -> impl IntoView {
	let score = format_score(result.score);
	view! {
		<div class="result-card">
			<h3>{result.file_name}</h3>
			<p>
				<strong>"Path:"</strong>
				" "
				{result.file_path}
			</p>
			<p>
				<strong>"Score:"</strong>
				" "
				{score}
			</p>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::format_score;

	#[test]
	fn three_decimals() {
		assert_eq!(format_score(Some(0.123456)), "0.123");
		assert_eq!(format_score(Some(1.0)), "1.000");
		assert_eq!(format_score(Some(2.71828)), "2.718");
	}

	#[test]
	fn missing_or_nan_is_na() {
		assert_eq!(format_score(None), "N/A");
		assert_eq!(format_score(Some(f64::NAN)), "N/A");
		assert_eq!(format_score(Some(f64::INFINITY)), "N/A");
	}
}
