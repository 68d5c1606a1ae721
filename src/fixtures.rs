//! The canonical expected dataset.
//!
//! This is the reference collection API responses are validated against.
//! Filtered views preserve the relative order of the underlying table; the
//! comparator downstream does not rely on that order, but the views stay
//! deterministic so failure output is stable.

use crate::model::Post;

/// The hardcoded reference collection of posts, queryable by id and by
/// user id.
#[derive(Debug, Clone)]
pub struct Dataset {
    posts: Vec<Post>,
}

impl Dataset {
    /// The canonical dataset: ids 1..=25 spread over user ids 1..=10.
    pub fn canonical() -> Self {
        let rows = [
            (1, 1, "sunt aut facere repellat", "quia et suscipit recusandae consequuntur"),
            (1, 2, "qui est esse", "est rerum tempore vitae sequi sint"),
            (1, 3, "ea molestias quasi exercitationem", "et iusto sed quo iure reprehenderit"),
            (2, 4, "eum et est occaecati", "ullam et saepe reiciendis voluptatem"),
            (2, 5, "nesciunt quas odio", "repudiandae veniam quaerat sunt sed alias"),
            (3, 6, "dolorem eum magni", "ut aspernatur corporis harum nihil quis"),
            (3, 7, "magnam facilis autem", "dolore placeat quibusdam ea quo vitae"),
            (3, 8, "dolorem dolore est ipsam", "dignissimos aperiam dolorem qui eum"),
            (4, 9, "nesciunt iure omnis", "consectetur animi nesciunt iure dolore"),
            (4, 10, "optio molestias id quia", "quo et expedita modi cum officia"),
            (5, 11, "et ea vero quia", "delectus reiciendis molestiae occaecati"),
            (5, 12, "in quibusdam tempore", "itaque id aut magnam praesentium quia"),
            (5, 13, "dolorum ut in voluptas", "aut dicta possimus sint mollitia voluptas"),
            (6, 14, "voluptatem eligendi optio", "fuga et accusamus dolorum perferendis"),
            (6, 15, "eveniet quod temporibus", "reprehenderit quos placeat velit minima"),
            (7, 16, "sint suscipit perspiciatis", "suscipit nam nisi quo aperiam aut"),
            (7, 17, "fugit voluptas sed molestias", "eos voluptas et aut odit natus earum"),
            (7, 18, "voluptate et itaque vero", "eum non blanditiis soluta porro quibusdam"),
            (8, 19, "adipisci placeat illum", "illum quis cupiditate provident sit"),
            (8, 20, "doloribus ad provident", "qui consequuntur ducimus possimus quisquam"),
            (9, 21, "asperiores ea ipsam", "magni excepturi beatae sint laudantium"),
            (9, 22, "dolor sint quo a", "aut soluta inventore magnam tempora"),
            (9, 23, "maxime id vitae nihil", "veritatis unde neque eligendi molestiae"),
            (10, 24, "autem hic labore sunt", "enim et ex nulla omnis voluptas quia"),
            (10, 25, "rem alias distinctio quo", "ullam consequatur ut omnis quis sit vel"),
        ];

        Self {
            posts: rows
                .into_iter()
                .map(|(user_id, id, title, body)| Post::new(user_id, id, title, body))
                .collect(),
        }
    }

    /// The full collection, in table order.
    pub fn all(&self) -> Vec<Post> {
        self.posts.clone()
    }

    /// Borrows the underlying table.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Every post whose id matches, relative order preserved.
    pub fn by_id(&self, id: u64) -> Vec<Post> {
        self.posts.iter().filter(|p| p.id == id).cloned().collect()
    }

    /// The subsequence of posts owned by `user_id`, relative order
    /// preserved.
    pub fn by_user_id(&self, user_id: u64) -> Vec<Post> {
        self.posts
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect()
    }

    /// One past the highest id in the table. The service assigns this id to
    /// created posts.
    pub fn next_id(&self) -> u64 {
        self.posts.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }
}
