use serenity::model::id::UserId;

pub struct DrawOptions<'a> {
    participants: &'a [UserId],
    num_winners: u32,
}

impl<'a> DrawOptions<'a> {
    pub fn new(participants: &'a [UserId], num_winners: u32) -> Self {
        DrawOptions {
            participants,
            num_winners,
        }
    }

    // Returns the eligible participants (the bot already filtered out).
    pub fn participants(&self) -> &'a [UserId] {
        self.participants
    }

    // Returns how many winners can actually be drawn.
    pub fn winners_to_draw(&self) -> usize {
        (self.num_winners as usize).min(self.participants.len())
    }
}

pub trait WinnerStrategy: Send + Sync {
    // Returns distinct winners picked from the participants in the options.
    fn select(&self, options: &DrawOptions) -> Vec<UserId>;
}
