use super::model::ArtworkRecord;

/// Primeiro registro com o mesmo conteúdo. O registro fica em ordem
/// de chegada, então a duplicata aponta sempre para o upload mais
/// antigo — nunca o contrário.
pub fn find_duplicate<'a>(
    records: &'a [ArtworkRecord],
    checksum: &str,
) -> Option<&'a ArtworkRecord> {
    if checksum.is_empty() {
        return None;
    }

    records.iter().find(|r| r.checksum == checksum)
}
