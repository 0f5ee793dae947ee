//! Identity token for a lookup

/// Checksum of a string, as Terraform's `schema.HashString` computes it
pub fn hash_string(s: &str) -> u32 {
    crc32fast::hash(s.as_bytes())
}

/// Stable identifier for a lookup of `names` in `organization`.
///
/// Names are concatenated in the given order with no separator before
/// hashing, so `["ab", "c"]` and `["a", "bc"]` share an identifier.
pub fn resource_id<S: AsRef<str>>(organization: &str, names: &[S]) -> String {
    let joined: String = names.iter().map(|n| n.as_ref()).collect();
    format!("{}/{}", organization, hash_string(&joined))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_string_is_crc32() {
        // CRC-32/ISO-HDLC check value
        assert_eq!(hash_string("123456789"), 0xCBF4_3926);
        assert_eq!(hash_string(""), 0);
    }

    #[test]
    fn test_resource_id_format() {
        let id = resource_id("acme", &["web", "db"]);
        assert_eq!(id, format!("acme/{}", hash_string("webdb")));
    }

    #[test]
    fn test_resource_id_depends_on_order() {
        assert_ne!(
            resource_id("acme", &["web", "db"]),
            resource_id("acme", &["db", "web"])
        );
    }

    #[test]
    fn test_resource_id_depends_on_organization() {
        assert_ne!(resource_id("acme", &["*"]), resource_id("globex", &["*"]));
    }

    #[test]
    fn test_unseparated_names_collide() {
        assert_eq!(
            resource_id("acme", &["ab", "c"]),
            resource_id("acme", &["a", "bc"])
        );
    }
}
