use colour::red;

pub fn print_intro() {
    println!(
        r#"
         _
   ___  (_)_ ________ ____
  / _ \/ /\ \ / __/ _ `/ _ \
 / .__/_//_\_\\__/\_,_/_//_/
/_/                             "#
    );

    if cfg!(debug_assertions) {
        red!("\nWARNING: YOU ARE RUNNING IN DEBUG MODE. Keep in mind that everything is way slower than it should be.\n\n");
    }
}
