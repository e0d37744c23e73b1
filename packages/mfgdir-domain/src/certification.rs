/// Route slug to the `certification_type` string stored on certification rows.
const CERTIFICATION_TYPES: [(&str, &str); 9] = [
	("iso-9001", "ISO 9001"),
	("iso-13485", "ISO 13485"),
	("iso-14001", "ISO 14001"),
	("as9100", "AS9100"),
	("iatf-16949", "IATF 16949"),
	("itar", "ITAR"),
	("ipc-a-610", "IPC-A-610"),
	("j-std-001", "J-STD-001"),
	("ul", "UL"),
];

pub fn canonical_certification(slug: &str) -> Option<&'static str> {
	let slug = slug.trim().to_ascii_lowercase();

	CERTIFICATION_TYPES.iter().find(|(known, _)| *known == slug).map(|(_, canonical)| *canonical)
}
