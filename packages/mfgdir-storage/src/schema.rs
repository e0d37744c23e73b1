pub fn render_schema() -> String {
	expand_includes(include_str!("../../../sql/init.sql"))
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"00_extensions.sql" => out.push_str(include_str!("../../../sql/00_extensions.sql")),
				"tables/001_companies.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_companies.sql")),
				"tables/002_facilities.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_facilities.sql")),
				"tables/003_company_capabilities.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_company_capabilities.sql")),
				"tables/004_certifications.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_certifications.sql")),
				"tables/005_industries.sql" =>
					out.push_str(include_str!("../../../sql/tables/005_industries.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}
