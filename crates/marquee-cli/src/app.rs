//! Application state machine and menu dispatcher.

use std::io::{BufRead, Write};

use marquee_core::{
  Error, Manager, SessionLog,
  catalog::Catalog,
  movie::MovieId,
  manager::Listing,
  store::StateStore,
  table,
};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::console::Console;

// ─── States ───────────────────────────────────────────────────────────────────

/// Every screen returns to `MainMenu` once its operation finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
  MainMenu,
  Search,
  ViewWatchlist,
  ViewReviews,
  ViewLogs,
  Exit,
}

// ─── Menus ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum MainChoice {
  #[strum(to_string = "Search for a movie")]
  Search,
  #[strum(to_string = "View watchlist")]
  Watchlist,
  #[strum(to_string = "View reviews")]
  Reviews,
  #[strum(to_string = "View logs")]
  Logs,
  #[strum(to_string = "Exit")]
  Exit,
}

impl MainChoice {
  fn target(self) -> State {
    match self {
      Self::Search => State::Search,
      Self::Watchlist => State::ViewWatchlist,
      Self::Reviews => State::ViewReviews,
      Self::Logs => State::ViewLogs,
      Self::Exit => State::Exit,
    }
  }
}

/// What to do with the movie picked from search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum MovieAction {
  #[strum(to_string = "Add to watchlist")]
  AddToWatchlist,
  #[strum(to_string = "Write a review")]
  WriteReview,
  #[strum(to_string = "Back to main menu")]
  Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum WatchlistAction {
  #[strum(to_string = "Delete movie from watchlist")]
  Delete,
  #[strum(to_string = "Back to main menu")]
  Back,
}

/// Map a 1-based menu number onto the `n`th variant of `T`.
fn parse_choice<T: IntoEnumIterator>(input: &str) -> Result<T, Error> {
  let input = input.trim();
  input
    .parse::<usize>()
    .ok()
    .and_then(|n| n.checked_sub(1))
    .and_then(|i| T::iter().nth(i))
    .ok_or_else(|| Error::InvalidMenuSelection(input.to_owned()))
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<'log, S, C, R, W> {
  manager: Manager<S, C>,
  console: Console<R, W>,
  log:     &'log mut SessionLog,
  state:   State,
}

impl<'log, S, C, R, W> App<'log, S, C, R, W>
where
  S: StateStore,
  C: Catalog,
  R: BufRead,
  W: Write,
{
  pub fn new(
    manager: Manager<S, C>,
    console: Console<R, W>,
    log: &'log mut SessionLog,
  ) -> Self {
    Self { manager, console, log, state: State::MainMenu }
  }

  /// Log in, then drive the menus until the user exits or input runs out.
  pub async fn run(&mut self) -> anyhow::Result<()> {
    if !self.login().await? {
      return Ok(());
    }
    while self.state != State::Exit {
      self.state = self.step().await?;
    }
    self.log.info("session ended");
    Ok(())
  }

  // ── Login ─────────────────────────────────────────────────────────────────

  /// Prompt until the stored credentials match. Returns `false` if input ends
  /// first.
  async fn login(&mut self) -> anyhow::Result<bool> {
    self.console.say("Please login")?;
    loop {
      let Some(username) = self.console.prompt("Username: ")? else {
        return Ok(false);
      };
      let Some(password) = self.console.prompt("Password: ")? else {
        return Ok(false);
      };

      match self.manager.authenticate(&username, &password).await {
        Ok(()) => {
          self.log.info(format!("user {username:?} logged in"));
          self.console.say("Logged in")?;
          return Ok(true);
        }
        Err(Error::AuthenticationFailure) => {
          self.log.error(format!("failed login attempt for user {username:?}"));
          self
            .console
            .say("Incorrect username or password. Please try again.")?;
        }
        Err(e) => return Err(e.into()),
      }
    }
  }

  // ── Dispatch ──────────────────────────────────────────────────────────────

  async fn step(&mut self) -> anyhow::Result<State> {
    let result = match self.state {
      State::MainMenu => self.main_menu(),
      State::Search => self.search().await,
      State::ViewWatchlist => self.view_watchlist().await,
      State::ViewReviews => self.view_reviews().await,
      State::ViewLogs => self.view_logs(),
      State::Exit => Ok(State::Exit),
    };
    self.recover(result)
  }

  /// Report a failed catalog or store operation and fall back to the main
  /// menu. Terminal I/O failures still end the session.
  fn recover(&mut self, result: anyhow::Result<State>) -> anyhow::Result<State> {
    match result {
      Err(e) if e.is::<Error>() => {
        self.log.error(e.to_string());
        self.console.say(format!("Error: {e}"))?;
        Ok(State::MainMenu)
      }
      other => other,
    }
  }

  /// Show a numbered menu until a valid option is picked. `None` on end of
  /// input.
  fn choose<T>(&mut self, title: &str) -> anyhow::Result<Option<T>>
  where
    T: IntoEnumIterator + std::fmt::Display,
  {
    loop {
      self.console.say(title)?;
      for (i, option) in T::iter().enumerate() {
        self.console.say(format_args!("{}. {option}", i + 1))?;
      }
      let Some(input) = self.console.prompt("Select an option: ")? else {
        return Ok(None);
      };
      match parse_choice::<T>(&input) {
        Ok(choice) => return Ok(Some(choice)),
        Err(e) => {
          self.log.debug(e.to_string());
          self.console.say("Invalid selection, please try again.")?;
        }
      }
    }
  }

  // ── Screens ───────────────────────────────────────────────────────────────

  fn main_menu(&mut self) -> anyhow::Result<State> {
    Ok(
      self
        .choose::<MainChoice>("Main menu")?
        .map_or(State::Exit, MainChoice::target),
    )
  }

  async fn search(&mut self) -> anyhow::Result<State> {
    let Some(query) = self
      .console
      .prompt("Search for a movie by title or keyword: ")?
    else {
      return Ok(State::Exit);
    };
    let results = self.manager.search(&query).await?;
    self
      .log
      .info(format!("searched for {query:?} ({} results)", results.len()));
    self.console.say(table::movies(&results))?;

    let Some(typed) = self
      .console
      .prompt("Input the id of the movie you wish to select: ")?
    else {
      return Ok(State::Exit);
    };
    let detail = self.manager.movie(&MovieId::new(typed)).await?;
    let movie = detail.movie;
    self.log.debug(format!("selected {} ({})", movie.id, movie.title));
    self.console.say(format!("You have selected '{}'", movie.title))?;
    if let Some(tagline) = detail.tagline.filter(|t| !t.is_empty()) {
      self.console.say(tagline)?;
    }
    if let Some(runtime) = detail.runtime.filter(|&m| m > 0) {
      self.console.say(format!("Runtime: {runtime} min"))?;
    }
    if let Some(overview) = detail.overview.filter(|o| !o.is_empty()) {
      self.console.say(overview)?;
    }

    match self.choose::<MovieAction>("What would you like to do?")? {
      Some(MovieAction::AddToWatchlist) => {
        self.manager.add_to_watchlist(&movie.id).await?;
        self.log.info(format!("added {} to watchlist", movie.id));
        self
          .console
          .say(format!("Added '{}' to your watchlist.", movie.title))?;
      }
      Some(MovieAction::WriteReview) => {
        let Some(review) = self.console.prompt("Write your review: ")? else {
          return Ok(State::Exit);
        };
        self.manager.write_review(&movie.id, &review).await?;
        self.log.info(format!("saved review for {}", movie.id));
        self
          .console
          .say(format!("Saved your review of '{}'.", movie.title))?;
      }
      Some(MovieAction::Back) => {}
      None => return Ok(State::Exit),
    }
    Ok(State::MainMenu)
  }

  async fn view_watchlist(&mut self) -> anyhow::Result<State> {
    let listing = self.manager.watchlist().await?;
    self
      .log
      .info(format!("viewed watchlist ({} movies)", listing.records.len()));
    self.console.say(table::movies(&listing.records))?;
    self.report_missing(&listing)?;

    match self.choose::<WatchlistAction>("Actions:")? {
      Some(WatchlistAction::Delete) => {
        let Some(typed) = self.console.prompt("Type the movie ID to delete: ")?
        else {
          return Ok(State::Exit);
        };
        let id = MovieId::new(typed);
        self.manager.remove_from_watchlist(&id).await?;
        self.log.info(format!("removed {id} from watchlist"));
        self
          .console
          .say(format!("Removed {id} from your watchlist."))?;
      }
      Some(WatchlistAction::Back) => {}
      None => return Ok(State::Exit),
    }
    Ok(State::MainMenu)
  }

  async fn view_reviews(&mut self) -> anyhow::Result<State> {
    let listing = self.manager.reviews().await?;
    self
      .log
      .info(format!("viewed reviews ({} reviews)", listing.records.len()));
    self.console.say(table::reviews(&listing.records))?;
    self.report_missing(&listing)?;
    Ok(State::MainMenu)
  }

  /// Stored ids the catalog no longer returns keep a blank row; name them.
  fn report_missing(&mut self, listing: &Listing) -> anyhow::Result<()> {
    for id in &listing.missing {
      self.log.error(format!("catalog has no movie with id {id}"));
      self
        .console
        .say(format!("Movie {id} could not be found in the catalog."))?;
    }
    Ok(())
  }

  fn view_logs(&mut self) -> anyhow::Result<State> {
    let rendered = self.log.render();
    self.console.say(rendered)?;
    Ok(State::MainMenu)
  }
}
