//! Post collection ordering
//!
//! Stable sort over a collection by one of the four numeric fields.
//! Descending order reverses the comparator rather than the sequence,
//! so equal-key posts keep their relative input order either way.

use std::cmp::Ordering;

use crate::catalog::query::{SortDirection, SortField};
use crate::types::Post;

/// Sort a collection by the given field and direction.
///
/// Takes ownership of a freshly built collection; cached collections are
/// shared and never reordered in place.
pub fn sort_posts(mut posts: Vec<Post>, field: SortField, direction: SortDirection) -> Vec<Post> {
    posts.sort_by(|a, b| {
        let ordering = compare_by_field(a, b, field);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    posts
}

fn compare_by_field(a: &Post, b: &Post, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Reads => a.reads.cmp(&b.reads),
        SortField::Likes => a.likes.cmp(&b.likes),
        // total_cmp gives the total order the fractional field needs
        SortField::Popularity => a.popularity.total_cmp(&b.popularity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64, likes: u64, reads: u64, popularity: f32) -> Post {
        Post {
            id,
            author: format!("author-{id}"),
            author_id: id,
            likes,
            popularity,
            reads,
            tags: vec![],
        }
    }

    fn ids(posts: &[Post]) -> Vec<u64> {
        posts.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_sort_by_id_both_directions() {
        let input = vec![post(3, 0, 0, 0.0), post(1, 0, 0, 0.0), post(2, 0, 0, 0.0)];

        let asc = sort_posts(input.clone(), SortField::Id, SortDirection::Asc);
        assert_eq!(ids(&asc), vec![1, 2, 3]);

        let desc = sort_posts(input, SortField::Id, SortDirection::Desc);
        assert_eq!(ids(&desc), vec![3, 2, 1]);
    }

    #[test]
    fn test_sort_by_reads() {
        let input = vec![
            post(1, 0, 300, 0.0),
            post(2, 0, 100, 0.0),
            post(3, 0, 200, 0.0),
        ];

        let asc = sort_posts(input, SortField::Reads, SortDirection::Asc);
        assert_eq!(ids(&asc), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_by_likes_desc_matches_worked_example() {
        // history -> [P2(1000)], culture -> [P1(2000), P3(1200)]
        let merged = vec![
            post(2, 1000, 0, 0.0),
            post(1, 2000, 0, 0.0),
            post(3, 1200, 0, 0.0),
        ];

        let sorted = sort_posts(merged, SortField::Likes, SortDirection::Desc);
        assert_eq!(ids(&sorted), vec![1, 3, 2]);
    }

    #[test]
    fn test_sort_by_popularity_fractional() {
        let input = vec![
            post(1, 0, 0, 0.85),
            post(2, 0, 0, 0.13),
            post(3, 0, 0, 0.42),
        ];

        let asc = sort_posts(input.clone(), SortField::Popularity, SortDirection::Asc);
        assert_eq!(ids(&asc), vec![2, 3, 1]);

        let desc = sort_posts(input, SortField::Popularity, SortDirection::Desc);
        assert_eq!(ids(&desc), vec![1, 3, 2]);
    }

    #[test]
    fn test_sort_is_stable_on_equal_keys() {
        let input = vec![
            post(10, 50, 0, 0.0),
            post(11, 50, 0, 0.0),
            post(12, 10, 0, 0.0),
            post(13, 50, 0, 0.0),
        ];

        let asc = sort_posts(input.clone(), SortField::Likes, SortDirection::Asc);
        assert_eq!(ids(&asc), vec![12, 10, 11, 13]);

        // Reversed comparator, not reversed sequence: ties stay in input order
        let desc = sort_posts(input, SortField::Likes, SortDirection::Desc);
        assert_eq!(ids(&desc), vec![10, 11, 13, 12]);
    }

    #[test]
    fn test_sort_keeps_element_set() {
        let input = vec![post(1, 5, 0, 0.0), post(2, 3, 0, 0.0), post(3, 4, 0, 0.0)];
        let sorted = sort_posts(input, SortField::Likes, SortDirection::Asc);

        let mut sorted_ids = ids(&sorted);
        sorted_ids.sort_unstable();
        assert_eq!(sorted_ids, vec![1, 2, 3]);
    }
}
